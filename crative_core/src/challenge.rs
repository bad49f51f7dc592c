// Challenges and the ordered registry that holds them.
//
// A `Challenge` is a prompt, a list of starting crates, and a `Predicate`.
// The `ChallengeRegistry` is the ordered list the player walks through,
// indexed by level. It is built once (`new()` for a custom table,
// `standard()` for the built-in catalog) and is read-only afterwards, so
// it is `Send + Sync` and can be shared across threads for batch
// verification.
//
// Construction validates the whole table up front: a challenge whose
// starting crates fall outside the grid, or whose predicate can never be
// satisfied at these bounds, is a `CrativeError::MalformedChallenge` at
// startup rather than a silent `false` at play time.
//
// `evaluate()` is the single entry point used by the session and the CLI:
// group the grid once, then hand the partition to the level's predicate.
//
// See also: `catalog.rs` for the standard table, `predicate.rs` for the
// rule families, `session.rs` for the per-player state machine.

use crate::error::{CrativeError, Result};
use crate::grid::{Occupancy, check_bounds, in_bounds};
use crate::grouping::{Partition, group_cells};
use crate::predicate::Predicate;
use crate::types::VoxelCoord;
use rustc_hash::FxHashSet;

/// One puzzle: what to tell the player, what to start them with, and how
/// to judge their build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// Stable identifier, unique within a registry (e.g. `"cube8"`).
    pub name: String,
    /// Instruction text shown while the level is active.
    pub prompt: String,
    /// Crates placed for the player when the level starts.
    pub initial_cells: Vec<VoxelCoord>,
    pub predicate: Predicate,
}

impl Challenge {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        initial_cells: Vec<VoxelCoord>,
        predicate: Predicate,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            initial_cells,
            predicate,
        }
    }

    /// Judge an already-grouped grid.
    pub fn evaluate(&self, partition: &Partition) -> bool {
        self.predicate.evaluate(partition, &self.initial_cells)
    }
}

/// Ordered, validated list of challenges for one grid size.
#[derive(Clone, Debug)]
pub struct ChallengeRegistry {
    bounds: (u32, u32, u32),
    challenges: Vec<Challenge>,
}

impl ChallengeRegistry {
    /// Validate and freeze a challenge table for grids of `bounds`.
    pub fn new(bounds: (u32, u32, u32), challenges: Vec<Challenge>) -> Result<Self> {
        check_bounds(bounds)?;
        if challenges.is_empty() {
            return Err(CrativeError::malformed(
                "<registry>",
                "a registry needs at least one challenge",
            ));
        }

        let mut names = FxHashSet::default();
        for challenge in &challenges {
            if !names.insert(challenge.name.as_str()) {
                return Err(CrativeError::malformed(
                    &challenge.name,
                    "duplicate challenge name",
                ));
            }
            validate_initial_cells(challenge, bounds)?;
            challenge
                .predicate
                .validate(bounds, &challenge.initial_cells)
                .map_err(|reason| CrativeError::malformed(&challenge.name, reason))?;
        }

        Ok(Self { bounds, challenges })
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn bounds(&self) -> (u32, u32, u32) {
        self.bounds
    }

    pub fn get(&self, level: usize) -> Option<&Challenge> {
        self.challenges.get(level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter()
    }

    /// Level index of the challenge called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.challenges.iter().position(|c| c.name == name)
    }

    /// Starting crates for `level`, for whoever sets the level up.
    pub fn initial_cells(&self, level: usize) -> Result<&[VoxelCoord]> {
        Ok(&self.challenge(level)?.initial_cells)
    }

    /// The level after `level`. Wraps to 0 after the last one.
    pub fn next_level(&self, level: usize) -> usize {
        (level + 1) % self.challenges.len()
    }

    /// True iff `level` is the last challenge in the table.
    pub fn is_last(&self, level: usize) -> bool {
        level + 1 == self.challenges.len()
    }

    /// Group `grid` and judge it against `level`. Errors are an
    /// out-of-range level or a grid of another size; a failing build is
    /// `Ok(false)`.
    pub fn evaluate<G: Occupancy + ?Sized>(&self, grid: &G, level: usize) -> Result<bool> {
        let challenge = self.challenge(level)?;
        self.check_grid_size(grid.bounds())?;
        let partition = group_cells(grid);
        Ok(challenge.evaluate(&partition))
    }

    /// World-anchored levels only line up on grids of the registry's size.
    pub fn check_grid_size(&self, size: (u32, u32, u32)) -> Result<()> {
        if size != self.bounds {
            return Err(CrativeError::GridSizeMismatch {
                found: size,
                expected: self.bounds,
            });
        }
        Ok(())
    }

    /// Unchecked lookup for callers that keep `level` in range themselves.
    pub(crate) fn at(&self, level: usize) -> &Challenge {
        &self.challenges[level]
    }

    pub(crate) fn challenge(&self, level: usize) -> Result<&Challenge> {
        self.challenges
            .get(level)
            .ok_or(CrativeError::LevelOutOfRange {
                level,
                count: self.challenges.len(),
            })
    }
}

fn validate_initial_cells(challenge: &Challenge, bounds: (u32, u32, u32)) -> Result<()> {
    let mut seen = FxHashSet::default();
    for &c in &challenge.initial_cells {
        if !in_bounds(bounds, c) {
            return Err(CrativeError::malformed(
                &challenge.name,
                format!("starting cell {c} lies outside grid bounds {bounds:?}"),
            ));
        }
        if !seen.insert(c) {
            return Err(CrativeError::malformed(
                &challenge.name,
                format!("starting cell {c} is listed twice"),
            ));
        }
    }
    Ok(())
}
