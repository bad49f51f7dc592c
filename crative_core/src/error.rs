// Error type for every fallible engine operation.
//
// Evaluation itself never fails: a grid that does not satisfy a challenge is
// a `false` verdict, not an error. Errors are reserved for construction-time
// problems (a challenge table that cannot fit the grid, a snapshot that
// overflows its own bounds) and for driver-side I/O and JSON parsing.

use crate::types::VoxelCoord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrativeError {
    #[error("grid size {size:?} must be non-zero on every axis")]
    EmptyGrid { size: (u32, u32, u32) },

    #[error("grid size {size:?} exceeds the largest addressable extent {max} on some axis")]
    GridTooLarge { size: (u32, u32, u32), max: u32 },

    #[error("grid size {found:?} does not match the registry's grid size {expected:?}")]
    GridSizeMismatch {
        found: (u32, u32, u32),
        expected: (u32, u32, u32),
    },

    #[error("cell {coord} lies outside grid bounds {bounds:?}")]
    CellOutOfBounds {
        coord: VoxelCoord,
        bounds: (u32, u32, u32),
    },

    #[error("malformed challenge `{challenge}`: {reason}")]
    MalformedChallenge { challenge: String, reason: String },

    #[error("level {level} out of range (registry has {count} challenges)")]
    LevelOutOfRange { level: usize, count: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrativeError {
    pub(crate) fn malformed(challenge: &str, reason: impl Into<String>) -> Self {
        Self::MalformedChallenge {
            challenge: challenge.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrativeError>;
