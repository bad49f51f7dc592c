// Dense 3D occupancy grid for placed crates.
//
// The grid is stored as a flat `Vec<bool>` indexed by
// `x + z * size_x + y * size_x * size_z`, giving O(1) read/write access.
// Out-of-bounds reads return "empty"; out-of-bounds writes are no-ops.
//
// The grid holds occupancy only. Whatever draws the crates keeps its own
// registry of visual objects keyed by `VoxelCoord`; nothing here references
// rendering state.
//
// The engine reads grids through the `Occupancy` trait, which is the whole
// contract the grouping pass needs: a total `is_occupied` and fixed bounds.
// `VoxelGrid` is the stock implementation used by the session helpers, the
// CLI driver, and the tests.
//
// `GridSnapshot` is the serializable form (size + occupied cells + optional
// level index) used to save arrangements to JSON and load them back.

use crate::error::{CrativeError, Result};
use crate::types::VoxelCoord;
use serde::{Deserialize, Serialize};

/// Largest extent a grid axis may have. Coordinates are `i32`, so every
/// in-grid cell and its face neighbors must stay representable.
pub const MAX_EXTENT: u32 = i32::MAX as u32;

/// Whether `coord` lies inside a grid of `bounds`.
pub fn in_bounds((bx, by, bz): (u32, u32, u32), coord: VoxelCoord) -> bool {
    coord.x >= 0
        && coord.y >= 0
        && coord.z >= 0
        && (coord.x as u32) < bx
        && (coord.y as u32) < by
        && (coord.z as u32) < bz
}

/// Reject grid sizes the engine cannot address: zero on any axis, or wider
/// than `MAX_EXTENT`.
pub fn check_bounds(size: (u32, u32, u32)) -> Result<()> {
    let (sx, sy, sz) = size;
    if sx == 0 || sy == 0 || sz == 0 {
        return Err(CrativeError::EmptyGrid { size });
    }
    if sx > MAX_EXTENT || sy > MAX_EXTENT || sz > MAX_EXTENT {
        return Err(CrativeError::GridTooLarge {
            size,
            max: MAX_EXTENT,
        });
    }
    Ok(())
}

/// Read-only occupancy accessor consumed by the grouping pass.
///
/// Implementations must be total: any coordinate, including ones far outside
/// the grid, returns `false` rather than panicking.
pub trait Occupancy {
    /// Whether a crate sits at `coord`. `false` when out of bounds.
    fn is_occupied(&self, coord: VoxelCoord) -> bool;

    /// Grid size `(width, height, depth)`; fixed for the grid's lifetime.
    fn bounds(&self) -> (u32, u32, u32);
}

/// Dense boolean occupancy grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    cells: Vec<bool>,
    size_x: u32,
    size_y: u32,
    size_z: u32,
    occupied: usize,
}

impl VoxelGrid {
    /// Create an empty grid.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            cells: vec![false; total],
            size_x,
            size_y,
            size_z,
            occupied: 0,
        }
    }

    /// Build a grid with the given cells occupied. Unlike `place`, an
    /// out-of-bounds cell is an error here: the caller asked for a crate the
    /// grid cannot hold.
    pub fn from_cells(
        size: (u32, u32, u32),
        cells: impl IntoIterator<Item = VoxelCoord>,
    ) -> Result<Self> {
        let mut grid = Self::new(size.0, size.1, size.2);
        for coord in cells {
            if !grid.in_bounds(coord) {
                return Err(CrativeError::CellOutOfBounds {
                    coord,
                    bounds: size,
                });
            }
            grid.place(coord);
        }
        Ok(grid)
    }

    /// Check whether a coordinate is within bounds.
    pub fn in_bounds(&self, coord: VoxelCoord) -> bool {
        in_bounds(self.size(), coord)
    }

    /// Convert a coordinate to a flat index. Returns `None` if out of bounds.
    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            let x = coord.x as usize;
            let y = coord.y as usize;
            let z = coord.z as usize;
            let sx = self.size_x as usize;
            let sz = self.size_z as usize;
            Some(x + z * sx + y * sx * sz)
        } else {
            None
        }
    }

    /// Whether a crate sits at `coord`. `false` for out-of-bounds coordinates.
    pub fn is_occupied(&self, coord: VoxelCoord) -> bool {
        self.index(coord).is_some_and(|i| self.cells[i])
    }

    /// Place a crate. Returns `true` if the cell was empty and in bounds.
    pub fn place(&mut self, coord: VoxelCoord) -> bool {
        match self.index(coord) {
            Some(i) if !self.cells[i] => {
                self.cells[i] = true;
                self.occupied += 1;
                true
            }
            _ => false,
        }
    }

    /// Remove a crate. Returns `true` if a crate was there.
    pub fn remove(&mut self, coord: VoxelCoord) -> bool {
        match self.index(coord) {
            Some(i) if self.cells[i] => {
                self.cells[i] = false;
                self.occupied -= 1;
                true
            }
            _ => false,
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.occupied = 0;
    }

    /// Clear the grid, then place every listed cell. Out-of-bounds cells are
    /// skipped, matching `place`.
    pub fn seed(&mut self, cells: &[VoxelCoord]) {
        self.clear();
        for &coord in cells {
            self.place(coord);
        }
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Grid size `(width, height, depth)`.
    pub fn size(&self) -> (u32, u32, u32) {
        (self.size_x, self.size_y, self.size_z)
    }

    /// Occupied cells in scan order: z outer, then y, then x.
    pub fn occupied_cells(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        let (sx, sy, sz) = (self.size_x as i32, self.size_y as i32, self.size_z as i32);
        (0..sz).flat_map(move |z| {
            (0..sy).flat_map(move |y| {
                (0..sx)
                    .map(move |x| VoxelCoord::new(x, y, z))
                    .filter(move |&c| self.is_occupied(c))
            })
        })
    }

    /// Serializable copy of the current arrangement.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size(),
            cells: self.occupied_cells().collect(),
            level: None,
        }
    }

    /// Rebuild a grid from a snapshot. Rejects unaddressable sizes and cells
    /// outside the snapshot's own bounds.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self> {
        check_bounds(snapshot.size)?;
        Self::from_cells(snapshot.size, snapshot.cells.iter().copied())
    }
}

impl Occupancy for VoxelGrid {
    fn is_occupied(&self, coord: VoxelCoord) -> bool {
        VoxelGrid::is_occupied(self, coord)
    }

    fn bounds(&self) -> (u32, u32, u32) {
        self.size()
    }
}

/// Saved grid arrangement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Grid size `(width, height, depth)`.
    pub size: (u32, u32, u32),
    /// Occupied cells.
    pub cells: Vec<VoxelCoord>,
    /// Level the arrangement is meant to solve, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

impl GridSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
