// Per-player challenge session: the submit / advance state machine.
//
// `ChallengeEvaluator` owns a validated registry, the feedback text from the
// config, and the player's current level. It is the library-side half of
// the game loop; the host (a UI, the CLI) owns the grid and calls in:
//
//   AwaitingSubmit --submit()--> Evaluated(Pass | Fail)
//   Evaluated(Fail) --submit()--> Evaluated(..)      (resubmit re-evaluates)
//   Evaluated(Pass) --advance()--> AwaitingSubmit    (next level, wraps)
//   any --go_to_level() / restart()--> AwaitingSubmit
//
// `advance()` is refused unless the last verdict was a pass. `go_to_level()`
// is the only way to skip ahead (or restore a persisted level) and rejects
// out-of-range indices without changing state.
//
// `feedback()` answers with the level prompt while awaiting a submission,
// and with the configured success/failure line after one. A pass on the
// last level gets `final_success`, since advancing from there wraps the
// table back to level 0.
//
// See also: `challenge.rs` for the registry, `config.rs` for the feedback
// text defaults.

use crate::challenge::{Challenge, ChallengeRegistry};
use crate::config::FeedbackText;
use crate::error::{CrativeError, Result};
use crate::grid::{Occupancy, VoxelGrid};
use crate::grouping::group_cells;
use log::{info, warn};

/// Outcome of one submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn passed(self) -> bool {
        self == Verdict::Pass
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingSubmit,
    Evaluated(Verdict),
}

#[derive(Clone, Debug)]
pub struct ChallengeEvaluator {
    registry: ChallengeRegistry,
    feedback: FeedbackText,
    level: usize,
    state: SessionState,
}

impl ChallengeEvaluator {
    /// Start a session at `level` (0 for a new game, or a persisted level).
    pub fn new(registry: ChallengeRegistry, feedback: FeedbackText, level: usize) -> Result<Self> {
        if level >= registry.len() {
            return Err(CrativeError::LevelOutOfRange {
                level,
                count: registry.len(),
            });
        }
        Ok(Self {
            registry,
            feedback,
            level,
            state: SessionState::AwaitingSubmit,
        })
    }

    pub fn registry(&self) -> &ChallengeRegistry {
        &self.registry
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The active challenge.
    pub fn challenge(&self) -> &Challenge {
        self.registry.at(self.level)
    }

    /// True once the current level has been passed.
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Evaluated(Verdict::Pass)
    }

    /// Judge the player's grid against the current level. A grid sized
    /// differently from the registry is rejected and the state is left as
    /// it was.
    pub fn submit<G: Occupancy + ?Sized>(&mut self, grid: &G) -> Result<Verdict> {
        self.registry.check_grid_size(grid.bounds())?;
        let challenge = self.registry.at(self.level);
        let partition = group_cells(grid);
        let verdict = if challenge.evaluate(&partition) {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        info!(
            "level {} ({}): {:?} with {} groups",
            self.level,
            challenge.name,
            verdict,
            partition.len()
        );
        self.state = SessionState::Evaluated(verdict);
        Ok(verdict)
    }

    /// Move to the next level after a pass. Returns the new level, or
    /// `None` (and changes nothing) if the current level isn't passed.
    pub fn advance(&mut self) -> Option<usize> {
        if !self.is_complete() {
            return None;
        }
        let next = self.registry.next_level(self.level);
        info!("advancing from level {} to {}", self.level, next);
        self.level = next;
        self.state = SessionState::AwaitingSubmit;
        Some(next)
    }

    /// Jump to any level. Out-of-range levels are rejected and the session
    /// is left as it was.
    pub fn go_to_level(&mut self, level: usize) -> Result<()> {
        if level >= self.registry.len() {
            warn!(
                "rejected jump to level {} (registry has {} challenges)",
                level,
                self.registry.len()
            );
            return Err(CrativeError::LevelOutOfRange {
                level,
                count: self.registry.len(),
            });
        }
        info!("going to level {} ({})", level, self.registry.at(level).name);
        self.level = level;
        self.state = SessionState::AwaitingSubmit;
        Ok(())
    }

    /// Forget the last verdict and start the current level over.
    pub fn restart(&mut self) {
        info!("restarting level {}", self.level);
        self.state = SessionState::AwaitingSubmit;
    }

    /// Clear `grid` and place the current level's starting crates.
    pub fn prepare_grid(&self, grid: &mut VoxelGrid) {
        grid.seed(&self.challenge().initial_cells);
    }

    /// Text to show the player right now.
    pub fn feedback(&self) -> &str {
        match self.state {
            SessionState::AwaitingSubmit => self.challenge().prompt.as_str(),
            SessionState::Evaluated(Verdict::Pass) if self.registry.is_last(self.level) => {
                self.feedback.final_success.as_str()
            }
            SessionState::Evaluated(Verdict::Pass) => self.feedback.success.as_str(),
            SessionState::Evaluated(Verdict::Fail) => self.feedback.failure.as_str(),
        }
    }
}
