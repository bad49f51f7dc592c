// Data-driven engine configuration.
//
// `CrativeConfig` holds the grid size the challenge table is built for and
// the feedback lines shown after a submission. It is loaded from JSON at
// startup; every field has a default, so a config file only needs to name
// what it overrides. The defaults are a 21x12x21 play area and the game's
// stock feedback messages.
//
// The grid size matters beyond the play area: world-anchored challenges
// place their starting crates around `(W/2, 0, D/2)` and far-apart measures
// the ground spans, so a registry must be built from the same config the
// grids are sized from.
//
// See also: `catalog.rs` for how `grid_size` shapes the standard table,
// `session.rs` for where the feedback lines are used.

use crate::challenge::ChallengeRegistry;
use crate::error::Result;
use crate::grid::VoxelGrid;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text shown to the player after a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackText {
    /// Shown on a pass, except on the last level.
    pub success: String,
    /// Shown on a pass of the last level, before the table wraps around.
    pub final_success: String,
    /// Shown on a fail.
    pub failure: String,
}

impl Default for FeedbackText {
    fn default() -> Self {
        Self {
            success: "You got it! Click to continue.".to_string(),
            final_success: "You're done with crative, but you're not done being creative! \
                            Click to start a new game."
                .to_string(),
            failure: "Not quite. Keep trying!".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrativeConfig {
    /// Play area as `(width, height, depth)` in cells.
    pub grid_size: (u32, u32, u32),
    pub feedback: FeedbackText,
}

impl Default for CrativeConfig {
    fn default() -> Self {
        Self {
            grid_size: (21, 12, 21),
            feedback: FeedbackText::default(),
        }
    }
}

impl CrativeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// An empty grid of the configured size.
    pub fn empty_grid(&self) -> VoxelGrid {
        let (x, y, z) = self.grid_size;
        VoxelGrid::new(x, y, z)
    }

    /// The standard challenge table for the configured grid size.
    pub fn standard_registry(&self) -> Result<ChallengeRegistry> {
        ChallengeRegistry::standard(self.grid_size)
    }
}
