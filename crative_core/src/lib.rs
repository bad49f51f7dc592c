// crative_core: voxel connectivity and challenge validation engine.
//
// This crate decides whether a player's arrangement of crates on a 3D grid
// satisfies the active puzzle. It groups occupied cells into face-connected
// groups, then runs the level's predicate over that partition. It has no
// rendering or input dependencies and can be driven headless (see the
// `crative_cli` crate).
//
// Module overview:
// - `types.rs`:     VoxelCoord, Axis, face-neighbor offsets.
// - `grid.rs`:      Occupancy trait (the consumed grid interface), dense
//                   VoxelGrid store, and the GridSnapshot JSON form.
// - `grouping.rs`:  Scanline flood fill into maximal 6-connected groups.
// - `geometry.rs`:  Bounding boxes, neighbor counts, pattern and shape checks.
// - `predicate.rs`: The closed Predicate enum, one variant per rule family.
// - `challenge.rs`: Challenge + the validated, ordered ChallengeRegistry.
// - `catalog.rs`:   The standard twenty-level table.
// - `session.rs`:   ChallengeEvaluator, the submit/advance state machine.
// - `config.rs`:    CrativeConfig, grid size and feedback text, from JSON.
// - `error.rs`:     CrativeError and the crate Result alias.
//
// Evaluation is a pure function of the grid and the level: the grid is only
// borrowed, the registry is immutable after construction, and nothing here
// keeps state between calls except the session's level and last verdict.

pub mod catalog;
pub mod challenge;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod grouping;
pub mod predicate;
pub mod session;
pub mod types;

pub use challenge::{Challenge, ChallengeRegistry};
pub use config::{CrativeConfig, FeedbackText};
pub use error::{CrativeError, Result};
pub use grid::{GridSnapshot, Occupancy, VoxelGrid};
pub use grouping::{Group, Partition, group_cells};
pub use session::{ChallengeEvaluator, SessionState, Verdict};
pub use types::VoxelCoord;
