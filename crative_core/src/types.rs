// Core spatial types shared across the engine.
//
// Defines the grid coordinate (`VoxelCoord`), the `Axis` enum used by the
// scanline flood fill and the shape predicates, and the six face offsets that
// define adjacency. All coordinate types derive `Serialize`/`Deserialize` so
// grid snapshots and challenge data can be written to JSON.
//
// Adjacency is strictly 6-connected: two cells touch only when they differ by
// exactly one unit along exactly one axis. Edge and corner contact never
// connects crates.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A relative position `(dx, dy, dz)` used for face offsets and shape patterns.
pub type Offset = (i32, i32, i32);

/// The six face-adjacent offsets: ±x, ±y, ±z.
pub const FACE_OFFSETS: [Offset; 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// A position in the crate grid. Each component is in cell units.
///
/// Y is up; the ground is the `y == 0` layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// This coordinate shifted by a relative offset.
    pub const fn offset(self, (dx, dy, dz): Offset) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Like `offset`, but `None` if any component would overflow.
    pub fn checked_offset(self, (dx, dy, dz): Offset) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// This coordinate moved `delta` units along one axis.
    pub fn step(self, axis: Axis, delta: i32) -> Self {
        self.with_axis(axis, self.axis(axis) + delta)
    }

    /// The component along `axis`.
    pub fn axis(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// A copy with the component along `axis` replaced.
    pub fn with_axis(mut self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    /// The six face-adjacent coordinates (in `FACE_OFFSETS` order).
    pub fn face_neighbors(self) -> impl Iterator<Item = VoxelCoord> {
        FACE_OFFSETS.into_iter().map(move |o| self.offset(o))
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis: X = 0, Y = 1, Z = 2.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes in cyclic order: `(i + 1) % 3`, `(i + 2) % 3`.
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Pick the component of a `(x, y, z)` size triple along this axis.
    pub fn of<T: Copy>(self, (x, y, z): (T, T, T)) -> T {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }
}
