// Face-connected grouping of occupied cells.
//
// `group_cells()` partitions every occupied cell of a grid into maximal
// 6-connected groups. It is the first half of every evaluation: predicates
// only ever see the resulting `Partition`.
//
// ## Algorithm
//
// Scanline flood fill, generalized from 2D to two secondary axes. The seed
// search walks the grid z-outer, y-middle, x-inner; every occupied cell not
// yet visited starts a new group. Inside a flood:
//
// 1. Pop a cell and rewind it to the start of its x-run (the lowest x that
//    is still occupied and unvisited), so each run is walked in +x only.
// 2. Walk the run, marking each cell visited and adding it to the group.
// 3. For each secondary axis (y, z) and each side (before/after), look at
//    the neighboring scanline. A per-run `seeded` flag queues at most one
//    cell per contiguous stretch of that scanline; the flag resets as soon
//    as the neighboring scanline is blocked (empty or already visited).
//
// Every cell is marked exactly once and queued at most a small constant
// number of times, so the pass is O(occupied cells) plus the O(volume) seed
// scan.
//
// Group order follows the seed scan and is not meaningful; neither is the
// iteration order inside a group. Callers compare groups as sets.

use crate::grid::Occupancy;
use crate::types::{Axis, VoxelCoord};
use log::debug;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// A maximal set of face-connected occupied cells.
pub type Group = FxHashSet<VoxelCoord>;

/// Every group of a grid, in seed-scan order.
pub type Partition = Vec<Group>;

/// The scanline's secondary axes. Both are handled by the same code path.
const SECONDARY_AXES: [Axis; 2] = [Axis::Y, Axis::Z];

/// Visited flags, laid out like `VoxelGrid` storage.
struct VisitMap {
    flags: Vec<bool>,
    size: [i32; 3],
}

impl VisitMap {
    fn new(size: [i32; 3]) -> Self {
        let total = size.iter().map(|&s| s.max(0) as usize).product();
        Self {
            flags: vec![false; total],
            size,
        }
    }

    /// Flat index; callers only pass in-bounds coordinates.
    fn index(&self, c: VoxelCoord) -> usize {
        let [sx, _, sz] = self.size;
        (c.x + c.z * sx + c.y * sx * sz) as usize
    }

    fn in_bounds(&self, c: VoxelCoord) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let v = c.axis(axis);
            v >= 0 && v < self.size[axis.index()]
        })
    }

    fn is_visited(&self, c: VoxelCoord) -> bool {
        self.flags[self.index(c)]
    }

    fn mark(&mut self, c: VoxelCoord) {
        let i = self.index(c);
        self.flags[i] = true;
    }
}

/// Partition all occupied cells of `grid` into maximal face-connected groups.
pub fn group_cells<G: Occupancy + ?Sized>(grid: &G) -> Partition {
    let (sx, sy, sz) = grid.bounds();
    let size = [sx as i32, sy as i32, sz as i32];
    let mut visited = VisitMap::new(size);
    let mut partition = Partition::new();

    for z in 0..size[2] {
        for y in 0..size[1] {
            for x in 0..size[0] {
                let seed = VoxelCoord::new(x, y, z);
                if grid.is_occupied(seed) && !visited.is_visited(seed) {
                    partition.push(flood(grid, &mut visited, seed));
                }
            }
        }
    }

    debug!(
        "grouped {} occupied cells into {} groups",
        partition.iter().map(|g| g.len()).sum::<usize>(),
        partition.len()
    );
    partition
}

/// Occupied and not yet claimed by any group.
fn floodable<G: Occupancy + ?Sized>(grid: &G, visited: &VisitMap, c: VoxelCoord) -> bool {
    grid.is_occupied(c) && !visited.is_visited(c)
}

/// Flood one group from `seed` using x-axis scanlines.
fn flood<G: Occupancy + ?Sized>(grid: &G, visited: &mut VisitMap, seed: VoxelCoord) -> Group {
    let mut group = Group::default();
    let mut queue = VecDeque::new();
    queue.push_back(seed);

    while let Some(mut cursor) = queue.pop_front() {
        if visited.is_visited(cursor) {
            // Swallowed by another run after it was queued.
            continue;
        }

        // Rewind to the start of the run so we only walk in +x.
        while cursor.x > 0 && floodable(grid, visited, cursor.step(Axis::X, -1)) {
            cursor.x -= 1;
        }

        let mut seeded_before = [false; 2];
        let mut seeded_after = [false; 2];

        while cursor.x < visited.size[0] && floodable(grid, visited, cursor) {
            visited.mark(cursor);
            group.insert(cursor);

            for (slot, &axis) in SECONDARY_AXES.iter().enumerate() {
                for (delta, seeded) in [(-1, &mut seeded_before[slot]), (1, &mut seeded_after[slot])]
                {
                    let neighbor = cursor.step(axis, delta);
                    if !visited.in_bounds(neighbor) {
                        continue;
                    }
                    let open = floodable(grid, visited, neighbor);
                    if open && !*seeded {
                        queue.push_back(neighbor);
                        *seeded = true;
                    } else if !open {
                        *seeded = false;
                    }
                }
            }

            cursor.x += 1;
        }
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VoxelGrid;
    use std::collections::BTreeSet;

    fn grid_with(size: (u32, u32, u32), cells: &[(i32, i32, i32)]) -> VoxelGrid {
        VoxelGrid::from_cells(size, cells.iter().map(|&(x, y, z)| VoxelCoord::new(x, y, z)))
            .unwrap()
    }

    /// Groups as sorted sets, sorted by their smallest cell, so tests can
    /// compare partitions without depending on scan order.
    fn normalized(partition: &Partition) -> Vec<BTreeSet<VoxelCoord>> {
        let mut sets: Vec<BTreeSet<VoxelCoord>> = partition
            .iter()
            .map(|g| g.iter().copied().collect())
            .collect();
        sets.sort();
        sets
    }

    #[test]
    fn empty_grid_has_no_groups() {
        let grid = VoxelGrid::new(6, 6, 6);
        assert!(group_cells(&grid).is_empty());
    }

    #[test]
    fn zero_sized_grid_has_no_groups() {
        let grid = VoxelGrid::default();
        assert!(group_cells(&grid).is_empty());
    }

    #[test]
    fn single_cell_is_one_group() {
        let grid = grid_with((4, 4, 4), &[(2, 3, 1)]);
        let partition = group_cells(&grid);
        assert_eq!(partition.len(), 1);
        assert!(partition[0].contains(&VoxelCoord::new(2, 3, 1)));
    }

    #[test]
    fn diagonal_contact_does_not_connect() {
        // Edge-adjacent and corner-adjacent pairs stay separate.
        let grid = grid_with((4, 4, 4), &[(0, 0, 0), (1, 1, 0), (2, 2, 1)]);
        let partition = group_cells(&grid);
        assert_eq!(partition.len(), 3);
        assert!(partition.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn each_axis_connects() {
        for offset in [(1, 0, 0), (0, 1, 0), (0, 0, 1)] {
            let grid = grid_with((3, 3, 3), &[(1, 1, 1), (1 + offset.0, 1 + offset.1, 1 + offset.2)]);
            assert_eq!(group_cells(&grid).len(), 1, "offset {offset:?} should connect");
        }
    }

    #[test]
    fn cube_is_one_group() {
        let mut cells = Vec::new();
        for x in 0..2 {
            for y in 0..2 {
                for z in 0..2 {
                    cells.push((x, y, z));
                }
            }
        }
        let partition = group_cells(&grid_with((4, 4, 4), &cells));
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].len(), 8);
    }

    #[test]
    fn u_shape_joins_through_the_bottom() {
        // Two columns seeded as separate runs meet through a floor; the
        // scanline must still merge them into one group.
        let cells = [
            (0, 0, 0),
            (1, 0, 0),
            (2, 0, 0),
            (0, 1, 0),
            (0, 2, 0),
            (2, 1, 0),
            (2, 2, 0),
        ];
        let partition = group_cells(&grid_with((3, 3, 1), &cells));
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].len(), 7);
    }

    #[test]
    fn comb_seeds_every_tooth() {
        // A spine along x with teeth hanging in +z. Every tooth is a separate
        // stretch of the after-scanline, so the seeded flag must reset
        // between them.
        let mut cells: Vec<_> = (0..7).map(|x| (x, 0, 0)).collect();
        for x in (0..7).step_by(2) {
            cells.push((x, 0, 1));
            cells.push((x, 0, 2));
        }
        let partition = group_cells(&grid_with((7, 1, 3), &cells));
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].len(), cells.len());
    }

    #[test]
    fn spiral_staircase_is_one_group() {
        // Winds through both secondary axes.
        let cells = [
            (0, 0, 0),
            (1, 0, 0),
            (1, 1, 0),
            (1, 1, 1),
            (0, 1, 1),
            (0, 2, 1),
            (0, 2, 0),
            (0, 3, 0),
        ];
        let partition = group_cells(&grid_with((2, 4, 2), &cells));
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].len(), cells.len());
    }

    #[test]
    fn separate_towers_stay_separate() {
        let cells = [(0, 0, 0), (0, 1, 0), (2, 0, 0), (2, 1, 0), (2, 2, 0), (0, 0, 2)];
        let partition = group_cells(&grid_with((3, 3, 3), &cells));
        let sets = normalized(&partition);
        assert_eq!(sets.len(), 3);
        let mut sizes: Vec<_> = sets.iter().map(|s| s.len()).collect();
        sizes.sort();
        assert_eq!(sizes, vec![1, 2, 3]);
    }

    #[test]
    fn cells_on_grid_faces_are_grouped() {
        // Runs touching x = max and the far y/z faces exercise the bound checks.
        let cells = [(3, 0, 0), (3, 0, 1), (3, 1, 1), (3, 3, 3), (2, 3, 3)];
        let partition = group_cells(&grid_with((4, 4, 4), &cells));
        assert_eq!(normalized(&partition).len(), 2);
    }

    #[test]
    fn grouping_is_idempotent() {
        let cells = [(0, 0, 0), (1, 0, 0), (3, 3, 3), (3, 2, 3), (1, 2, 1)];
        let grid = grid_with((4, 4, 4), &cells);
        assert_eq!(normalized(&group_cells(&grid)), normalized(&group_cells(&grid)));
    }

    #[test]
    fn full_grid_is_one_group() {
        let mut grid = VoxelGrid::new(5, 4, 3);
        for z in 0..3 {
            for y in 0..4 {
                for x in 0..5 {
                    grid.place(VoxelCoord::new(x, y, z));
                }
            }
        }
        let partition = group_cells(&grid);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].len(), 60);
    }
}
