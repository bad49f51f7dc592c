// Geometric toolkit shared by the challenge predicates.
//
// Everything here is a pure function over a set of cells (a `Group` or the
// union of several). Predicates combine these helpers instead of re-deriving
// bounding boxes and neighbor counts inline.
//
// - `BoundingBox`: componentwise min/max of a non-empty cell set, plus the
//   derived dims, volume, midpoint anchor, and flat-axis detection.
// - `neighbor_count()`: face neighbors of a cell *within the group under
//   test* (not the whole grid).
// - `has_all()` / `has_pattern()`: presence tests; shape matching is done by
//   requiring a fixed offset pattern around an anchor.
// - `combine()`: union of a partition, for predicates that count cells across
//   groups and ignore connectivity.
// - `run_length()`: length of the straight run through a cell along one axis.
// - `is_solid_box()` / `is_straight_line()`: the two shape checks reused by
//   the prism and line-size predicates.
//
// A bounding box is only defined for non-empty sets: `BoundingBox::of`
// returns `None` on empty input and predicates treat that as a failed match.

use crate::grouping::Group;
use crate::types::{Axis, Offset, VoxelCoord};

/// Axis-aligned bounding box of a non-empty cell set. `min` and `max` are
/// both inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
}

impl BoundingBox {
    /// Bounding box of `cells`, or `None` if there are none.
    pub fn of<'a>(cells: impl IntoIterator<Item = &'a VoxelCoord>) -> Option<Self> {
        let mut iter = cells.into_iter();
        let first = *iter.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for c in iter {
            bbox.min.x = bbox.min.x.min(c.x);
            bbox.min.y = bbox.min.y.min(c.y);
            bbox.min.z = bbox.min.z.min(c.z);
            bbox.max.x = bbox.max.x.max(c.x);
            bbox.max.y = bbox.max.y.max(c.y);
            bbox.max.z = bbox.max.z.max(c.z);
        }
        Some(bbox)
    }

    /// `max - min` per axis. Zero along an axis the set doesn't span.
    pub fn extent(&self) -> (i32, i32, i32) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Cell counts per axis (`max - min + 1`), i.e. width, height, depth.
    pub fn dims(&self) -> (i32, i32, i32) {
        let (dx, dy, dz) = self.extent();
        (dx + 1, dy + 1, dz + 1)
    }

    /// Number of cells the box encloses.
    pub fn volume(&self) -> i64 {
        let (w, h, d) = self.dims();
        i64::from(w) * i64::from(h) * i64::from(d)
    }

    /// Componentwise `(min + max) / 2`, rounded down. For boxes with an even
    /// span on an axis this picks the lower of the two middle cells.
    pub fn midpoint(&self) -> VoxelCoord {
        VoxelCoord::new(
            (self.min.x + self.max.x).div_euclid(2),
            (self.min.y + self.max.y).div_euclid(2),
            (self.min.z + self.max.z).div_euclid(2),
        )
    }

    /// The first axis (X, then Y, then Z) along which the box is one cell
    /// thick, or `None` if it is thicker along every axis.
    pub fn flat_axis(&self) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .find(|&axis| self.min.axis(axis) == self.max.axis(axis))
    }
}

/// How many of the six face neighbors of `cell` are members of `group`.
pub fn neighbor_count(group: &Group, cell: VoxelCoord) -> usize {
    cell.face_neighbors().filter(|n| group.contains(n)).count()
}

/// True iff every listed coordinate is present in `cells`.
pub fn has_all(cells: &Group, coords: impl IntoIterator<Item = VoxelCoord>) -> bool {
    coords.into_iter().all(|c| cells.contains(&c))
}

/// True iff every `anchor + offset` is present in `cells`.
pub fn has_pattern(cells: &Group, anchor: VoxelCoord, pattern: &[Offset]) -> bool {
    has_all(cells, pattern.iter().map(|&o| anchor.offset(o)))
}

/// Union of every group in a partition.
pub fn combine(partition: &[Group]) -> Group {
    let mut all = Group::default();
    for group in partition {
        all.extend(group.iter().copied());
    }
    all
}

/// Length of the contiguous run of `cells` through `cell` along `axis`,
/// walking outward in both directions until a gap. Zero if `cell` itself is
/// absent.
pub fn run_length(cells: &Group, cell: VoxelCoord, axis: Axis) -> i32 {
    if !cells.contains(&cell) {
        return 0;
    }
    let mut low = cell;
    while cells.contains(&low.step(axis, -1)) {
        low = low.step(axis, -1);
    }
    let mut high = cell;
    while cells.contains(&high.step(axis, 1)) {
        high = high.step(axis, 1);
    }
    high.axis(axis) - low.axis(axis) + 1
}

/// True iff `cells` is non-empty and fills its bounding box completely.
pub fn is_solid_box(cells: &Group) -> bool {
    BoundingBox::of(cells).is_some_and(|bbox| cells.len() as i64 == bbox.volume())
}

/// True iff `cells` is one straight run of consecutive cells along a single
/// axis. Walks from the bounding-box minimum along the first axis with a
/// non-zero extent and requires every stepped cell to be present.
pub fn is_straight_line(cells: &Group) -> bool {
    let Some(bbox) = BoundingBox::of(cells) else {
        return false;
    };
    let extent = bbox.extent();
    let Some(axis) = Axis::ALL.into_iter().find(|&axis| axis.of(extent) > 0) else {
        // A single cell.
        return cells.len() == 1;
    };
    let mut cursor = bbox.min;
    for _ in 0..cells.len() {
        if !cells.contains(&cursor) {
            return false;
        }
        cursor = cursor.step(axis, 1);
    }
    true
}
