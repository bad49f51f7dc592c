// Challenge predicates: the pass/fail rules a partition is judged against.
//
// `Predicate` is a closed enum: each variant is one family of rule, carrying
// the data that distinguishes one challenge from another in the same family
// (a crate count, an offset pattern, a set of world cells). `evaluate()`
// dispatches by `match`; there are no captured closures.
//
// ## Guard order
//
// Every family checks group count and group size before it computes any
// geometry. Groups produced by `grouping.rs` are never empty, but a
// predicate handed an empty partition or an empty group must still answer
// `false`, never panic, so every bounding box goes through `Option`.
//
// ## Anchors
//
// Shape families find their target relative to an anchor computed from the
// candidate's own bounding box (`Anchor::Min` or `Anchor::Midpoint`), which
// makes them translation-invariant. The containment families (`Preserve`,
// `ExactCells`) instead hold absolute world cells; `catalog.rs` resolves
// those against the world anchor when the registry is built.
//
// ## Validation
//
// `validate()` runs once per challenge at registry construction. It rejects
// definitions that no grid of the given bounds could satisfy (world cells
// outside the grid, lines longer than the grid, patterns wider than it).
// It reports a plain reason string; the registry attaches the challenge name.
//
// See also: `geometry.rs` for the shared helpers, `catalog.rs` for the
// concrete challenge table, `challenge.rs` for the registry.

use crate::geometry::{
    BoundingBox, combine, has_all, has_pattern, is_solid_box, is_straight_line, neighbor_count,
    run_length,
};
use crate::grid::in_bounds;
use crate::grouping::Group;
use crate::types::{Axis, Offset, VoxelCoord};
use log::trace;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Where a shape pattern is anchored on the candidate group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Bounding-box minimum corner.
    Min,
    /// Bounding-box midpoint, rounded down (see `BoundingBox::midpoint`).
    Midpoint,
}

impl Anchor {
    pub fn locate(self, bbox: &BoundingBox) -> VoxelCoord {
        match self {
            Anchor::Min => bbox.min,
            Anchor::Midpoint => bbox.midpoint(),
        }
    }
}

/// Comparison used by the volume/area family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Less,
    Equal,
    Greater,
}

impl Relation {
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::Less => lhs < rhs,
            Relation::Equal => lhs == rhs,
            Relation::Greater => lhs > rhs,
        }
    }
}

/// A pass/fail rule over a partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// One group of exactly `cells` crates containing `pattern` at the
    /// anchor taken from its own bounding box.
    ShapeAtAnchor {
        cells: usize,
        anchor: Anchor,
        pattern: &'static [Offset],
    },
    /// One solid box whose width equals its depth and whose height is twice
    /// its width.
    DoubledPrism,
    /// One group of more than `more_than` crates forming a solid square one
    /// crate thick.
    FlatSquare { more_than: usize },
    /// Exactly `groups` groups whose union is exactly `pattern`, anchored at
    /// the union's minimum corner, which must sit on the ground.
    GroundPattern {
        groups: usize,
        pattern: &'static [Offset],
    },
    /// One group of `cells` crates that keeps every starting crate, contains
    /// every `required` world cell, and, when `any_of` is non-empty, at
    /// least one of the `any_of` world cells.
    Preserve {
        cells: usize,
        required: Vec<VoxelCoord>,
        any_of: Vec<VoxelCoord>,
    },
    /// One group that is exactly the `target` world cells.
    ExactCells { target: Vec<VoxelCoord> },
    /// One group of `cells` crates where every crate touches exactly
    /// `degree` others. With `runs`, every straight run through every crate
    /// along every axis must have one of the listed lengths.
    Degree {
        cells: usize,
        degree: usize,
        runs: Option<&'static [i32]>,
    },
    /// `crates` single-crate groups spanning exactly `span` along every axis,
    /// with no two crates sharing an x, y, or z value.
    DistinctAxes { crates: usize, span: i32 },
    /// One group `layers` tall where every horizontal layer holds more
    /// crates than the layer below it.
    MonotonicLayers { layers: i32 },
    /// The multiset of group sizes equals `sizes`, and every group larger
    /// than one crate is a straight line.
    LineSizes { sizes: &'static [usize] },
    /// One solid box of more than `more_than` crates whose volume relates to
    /// its surface area by `relation`.
    VolumeToArea { relation: Relation, more_than: usize },
    /// One solid box of more than `more_than` crates whose crate count is prime.
    PrimePrism { more_than: usize },
    /// Two single crates on the ground, `span.0` apart in x and `span.1`
    /// apart in z.
    FarApart { span: (i32, i32) },
}

impl Predicate {
    /// Judge a partition. `initial_cells` are the challenge's starting crates.
    pub fn evaluate(&self, partition: &[Group], initial_cells: &[VoxelCoord]) -> bool {
        let verdict = match self {
            Predicate::ShapeAtAnchor {
                cells,
                anchor,
                pattern,
            } => shape_at_anchor(partition, *cells, *anchor, pattern),
            Predicate::DoubledPrism => doubled_prism(partition),
            Predicate::FlatSquare { more_than } => flat_square(partition, *more_than),
            Predicate::GroundPattern { groups, pattern } => {
                ground_pattern(partition, *groups, pattern)
            }
            Predicate::Preserve {
                cells,
                required,
                any_of,
            } => preserve(partition, initial_cells, *cells, required, any_of),
            Predicate::ExactCells { target } => exact_cells(partition, target),
            Predicate::Degree {
                cells,
                degree,
                runs,
            } => degree_of_every_cell(partition, *cells, *degree, *runs),
            Predicate::DistinctAxes { crates, span } => distinct_axes(partition, *crates, *span),
            Predicate::MonotonicLayers { layers } => monotonic_layers(partition, *layers),
            Predicate::LineSizes { sizes } => line_sizes(partition, sizes),
            Predicate::VolumeToArea {
                relation,
                more_than,
            } => volume_to_area(partition, *relation, *more_than),
            Predicate::PrimePrism { more_than } => prime_prism(partition, *more_than),
            Predicate::FarApart { span } => far_apart(partition, *span),
        };
        trace!(
            "{} over {} groups -> {}",
            self.family(),
            partition.len(),
            verdict
        );
        verdict
    }

    /// Short family name, for logs and listings.
    pub fn family(&self) -> &'static str {
        match self {
            Predicate::ShapeAtAnchor { .. } => "shape-at-anchor",
            Predicate::DoubledPrism => "doubled-prism",
            Predicate::FlatSquare { .. } => "flat-square",
            Predicate::GroundPattern { .. } => "ground-pattern",
            Predicate::Preserve { .. } => "preserve",
            Predicate::ExactCells { .. } => "exact-cells",
            Predicate::Degree { .. } => "degree",
            Predicate::DistinctAxes { .. } => "distinct-axes",
            Predicate::MonotonicLayers { .. } => "monotonic-layers",
            Predicate::LineSizes { .. } => "line-sizes",
            Predicate::VolumeToArea { .. } => "volume-to-area",
            Predicate::PrimePrism { .. } => "prime-prism",
            Predicate::FarApart { .. } => "far-apart",
        }
    }

    /// Whether the rule refers to absolute world cells rather than the
    /// candidate's own geometry.
    pub fn is_world_anchored(&self) -> bool {
        matches!(
            self,
            Predicate::Preserve { .. } | Predicate::ExactCells { .. }
        )
    }

    /// Absolute world cells this rule refers to.
    pub fn world_cells(&self) -> impl Iterator<Item = &VoxelCoord> {
        let (a, b): (&[VoxelCoord], &[VoxelCoord]) = match self {
            Predicate::Preserve {
                required, any_of, ..
            } => (required.as_slice(), any_of.as_slice()),
            Predicate::ExactCells { target } => (target.as_slice(), &[]),
            _ => (&[], &[]),
        };
        a.iter().chain(b)
    }

    /// Construction-time sanity check against the grid bounds. Returns a
    /// reason when no grid of these bounds could ever satisfy the rule.
    pub fn validate(
        &self,
        bounds: (u32, u32, u32),
        initial_cells: &[VoxelCoord],
    ) -> Result<(), String> {
        if let Some(c) = self.world_cells().find(|&&c| !in_bounds(bounds, c)) {
            return Err(format!("world cell {c} lies outside grid bounds {bounds:?}"));
        }
        let (bx, by, bz) = (bounds.0 as i64, bounds.1 as i64, bounds.2 as i64);
        match self {
            Predicate::ShapeAtAnchor { cells, pattern, .. } => {
                if pattern.is_empty() {
                    return Err("shape pattern is empty".into());
                }
                if pattern.len() > *cells {
                    return Err(format!(
                        "shape pattern has {} cells but the group is limited to {cells}",
                        pattern.len()
                    ));
                }
                check_pattern_fits(pattern, bounds)
            }
            Predicate::GroundPattern { groups, pattern } => {
                if *groups == 0 || *groups > pattern.len() {
                    return Err(format!(
                        "{groups} groups cannot form a pattern of {} cells",
                        pattern.len()
                    ));
                }
                check_pattern_fits(pattern, bounds)
            }
            Predicate::DoubledPrism | Predicate::FlatSquare { .. } => {
                if by < 2 {
                    return Err(format!("grid bounds {bounds:?} are too small"));
                }
                Ok(())
            }
            Predicate::Preserve {
                cells, required, ..
            } => {
                let mut kept: FxHashSet<VoxelCoord> = initial_cells.iter().copied().collect();
                kept.extend(required.iter().copied());
                if kept.len() > *cells {
                    return Err(format!(
                        "{} cells must be kept but the group is limited to {cells}",
                        kept.len()
                    ));
                }
                Ok(())
            }
            Predicate::ExactCells { target } => {
                let distinct: FxHashSet<VoxelCoord> = target.iter().copied().collect();
                if distinct.is_empty() || distinct.len() != target.len() {
                    return Err("target cells must be non-empty and unique".into());
                }
                Ok(())
            }
            Predicate::Degree { cells, degree, .. } => {
                if *cells == 0 || *degree > 6 {
                    return Err(format!("no group of {cells} cells has degree {degree}"));
                }
                Ok(())
            }
            Predicate::DistinctAxes { crates, span } => {
                let needed = i64::from(*span) + 1;
                if *span < 0 || *crates == 0 || *crates as i64 > needed {
                    return Err(format!("{crates} crates cannot span {span} distinctly"));
                }
                if needed > bx.min(by).min(bz) {
                    return Err(format!("span {span} does not fit in grid bounds {bounds:?}"));
                }
                Ok(())
            }
            Predicate::MonotonicLayers { layers } => {
                if *layers < 1 || i64::from(*layers) > by {
                    return Err(format!("{layers} layers do not fit in grid height {by}"));
                }
                Ok(())
            }
            Predicate::LineSizes { sizes } => {
                let longest = sizes.iter().copied().max().unwrap_or(0);
                if sizes.is_empty() || sizes.contains(&0) {
                    return Err("line sizes must be non-empty and positive".into());
                }
                if longest as i64 > bx.max(by).max(bz) {
                    return Err(format!(
                        "a line of {longest} crates does not fit in grid bounds {bounds:?}"
                    ));
                }
                Ok(())
            }
            Predicate::VolumeToArea { more_than, .. } | Predicate::PrimePrism { more_than } => {
                if *more_than as i64 >= bx * by * bz {
                    return Err(format!(
                        "more than {more_than} crates do not fit in grid bounds {bounds:?}"
                    ));
                }
                Ok(())
            }
            Predicate::FarApart { span } => {
                if span.0 < 1
                    || span.1 < 1
                    || i64::from(span.0) >= bx
                    || i64::from(span.1) >= bz
                {
                    return Err(format!(
                        "span {span:?} does not fit on the ground of grid bounds {bounds:?}"
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_pattern_fits(pattern: &[Offset], bounds: (u32, u32, u32)) -> Result<(), String> {
    let coords: Vec<VoxelCoord> = pattern.iter().map(|&o| VoxelCoord::new(0, 0, 0).offset(o)).collect();
    let Some(bbox) = BoundingBox::of(&coords) else {
        return Ok(());
    };
    let dims = bbox.dims();
    for axis in Axis::ALL {
        if i64::from(axis.of(dims)) > i64::from(axis.of(bounds)) {
            return Err(format!(
                "pattern of dims {dims:?} does not fit in grid bounds {bounds:?}"
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Families
// ---------------------------------------------------------------------------

/// The only group, when there is exactly one.
fn single(partition: &[Group]) -> Option<&Group> {
    match partition {
        [group] => Some(group),
        _ => None,
    }
}

fn shape_at_anchor(partition: &[Group], cells: usize, anchor: Anchor, pattern: &[Offset]) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    if group.len() != cells {
        return false;
    }
    let Some(bbox) = BoundingBox::of(group) else {
        return false;
    };
    has_pattern(group, anchor.locate(&bbox), pattern)
}

fn doubled_prism(partition: &[Group]) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    let Some(bbox) = BoundingBox::of(group) else {
        return false;
    };
    let (w, h, d) = bbox.dims();
    w == d && h == 2 * w && is_solid_box(group)
}

fn flat_square(partition: &[Group], more_than: usize) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    if group.len() <= more_than {
        return false;
    }
    let Some(bbox) = BoundingBox::of(group) else {
        return false;
    };
    let Some(flat) = bbox.flat_axis() else {
        return false;
    };
    let (row_axis, col_axis) = flat.others();
    let extent = bbox.extent();
    if row_axis.of(extent) != col_axis.of(extent) {
        return false;
    }
    for r in bbox.min.axis(row_axis)..=bbox.max.axis(row_axis) {
        for c in bbox.min.axis(col_axis)..=bbox.max.axis(col_axis) {
            let cell = bbox.min.with_axis(row_axis, r).with_axis(col_axis, c);
            if !group.contains(&cell) {
                return false;
            }
        }
    }
    true
}

fn ground_pattern(partition: &[Group], groups: usize, pattern: &[Offset]) -> bool {
    if partition.len() != groups {
        return false;
    }
    let all = combine(partition);
    if all.len() != pattern.len() {
        return false;
    }
    let Some(bbox) = BoundingBox::of(&all) else {
        return false;
    };
    bbox.min.y == 0 && has_pattern(&all, bbox.min, pattern)
}

fn preserve(
    partition: &[Group],
    initial_cells: &[VoxelCoord],
    cells: usize,
    required: &[VoxelCoord],
    any_of: &[VoxelCoord],
) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    group.len() == cells
        && has_all(group, initial_cells.iter().copied())
        && has_all(group, required.iter().copied())
        && (any_of.is_empty() || any_of.iter().any(|c| group.contains(c)))
}

fn exact_cells(partition: &[Group], target: &[VoxelCoord]) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    group.len() == target.len() && has_all(group, target.iter().copied())
}

fn degree_of_every_cell(
    partition: &[Group],
    cells: usize,
    degree: usize,
    runs: Option<&[i32]>,
) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    if group.len() != cells {
        return false;
    }
    if group.iter().any(|&c| neighbor_count(group, c) != degree) {
        return false;
    }
    match runs {
        None => true,
        Some(allowed) => group.iter().all(|&c| {
            Axis::ALL
                .into_iter()
                .all(|axis| allowed.contains(&run_length(group, c, axis)))
        }),
    }
}

fn distinct_axes(partition: &[Group], crates: usize, span: i32) -> bool {
    if partition.len() != crates {
        return false;
    }
    let all = combine(partition);
    if all.len() != crates {
        return false;
    }
    let Some(bbox) = BoundingBox::of(&all) else {
        return false;
    };
    if bbox.extent() != (span, span, span) {
        return false;
    }
    Axis::ALL.into_iter().all(|axis| {
        let values: FxHashSet<i32> = all.iter().map(|c| c.axis(axis)).collect();
        values.len() == crates
    })
}

fn monotonic_layers(partition: &[Group], layers: i32) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    let Some(bbox) = BoundingBox::of(group) else {
        return false;
    };
    if bbox.dims().1 != layers {
        return false;
    }
    let mut counts = vec![0usize; layers as usize];
    for c in group {
        counts[(c.y - bbox.min.y) as usize] += 1;
    }
    counts.windows(2).all(|pair| pair[1] > pair[0])
}

fn line_sizes(partition: &[Group], sizes: &[usize]) -> bool {
    let mut actual: SmallVec<[usize; 8]> = partition.iter().map(|g| g.len()).collect();
    let mut expected: SmallVec<[usize; 8]> = sizes.iter().copied().collect();
    actual.sort_unstable();
    expected.sort_unstable();
    if actual != expected {
        return false;
    }
    partition
        .iter()
        .filter(|g| g.len() > 1)
        .all(is_straight_line)
}

fn volume_to_area(partition: &[Group], relation: Relation, more_than: usize) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    if group.len() <= more_than || !is_solid_box(group) {
        return false;
    }
    let Some(bbox) = BoundingBox::of(group) else {
        return false;
    };
    let (w, h, d) = bbox.dims();
    let (w, h, d) = (i64::from(w), i64::from(h), i64::from(d));
    let volume = w * h * d;
    let area = 2 * (w * h + h * d + w * d);
    relation.holds(volume, area)
}

fn prime_prism(partition: &[Group], more_than: usize) -> bool {
    let Some(group) = single(partition) else {
        return false;
    };
    group.len() > more_than && is_prime(group.len()) && is_solid_box(group)
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn far_apart(partition: &[Group], span: (i32, i32)) -> bool {
    if partition.len() != 2 || partition.iter().any(|g| g.len() != 1) {
        return false;
    }
    let all = combine(partition);
    let cells: SmallVec<[VoxelCoord; 2]> = all.into_iter().collect();
    let [a, b] = cells.as_slice() else {
        return false;
    };
    a.y == 0 && b.y == 0 && (a.x - b.x).abs() == span.0 && (a.z - b.z).abs() == span.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(list: &[(i32, i32, i32)]) -> Group {
        list.iter().map(|&(x, y, z)| VoxelCoord::new(x, y, z)).collect()
    }

    fn cuboid(min: (i32, i32, i32), dims: (i32, i32, i32)) -> Group {
        let mut g = Group::default();
        for x in 0..dims.0 {
            for y in 0..dims.1 {
                for z in 0..dims.2 {
                    g.insert(VoxelCoord::new(min.0 + x, min.1 + y, min.2 + z));
                }
            }
        }
        g
    }

    fn singles(list: &[(i32, i32, i32)]) -> Vec<Group> {
        list.iter().map(|&c| group(&[c])).collect()
    }

    const CUBE: &[Offset] = &[
        (0, 0, 0),
        (1, 0, 0),
        (0, 1, 0),
        (1, 1, 0),
        (0, 0, 1),
        (1, 0, 1),
        (0, 1, 1),
        (1, 1, 1),
    ];

    const PLUS: &[Offset] = &[
        (0, 0, 0),
        (1, 0, 0),
        (-1, 0, 0),
        (0, 1, 0),
        (0, -1, 0),
        (0, 0, 1),
        (0, 0, -1),
    ];

    #[test]
    fn empty_partition_is_false_everywhere() {
        let predicates = [
            Predicate::ShapeAtAnchor {
                cells: 8,
                anchor: Anchor::Min,
                pattern: CUBE,
            },
            Predicate::DoubledPrism,
            Predicate::FlatSquare { more_than: 1 },
            Predicate::GroundPattern {
                groups: 1,
                pattern: &[(0, 0, 0)],
            },
            Predicate::ExactCells {
                target: vec![VoxelCoord::new(0, 0, 0)],
            },
            Predicate::Degree {
                cells: 8,
                degree: 2,
                runs: None,
            },
            Predicate::DistinctAxes { crates: 4, span: 3 },
            Predicate::MonotonicLayers { layers: 5 },
            Predicate::LineSizes { sizes: &[1, 2] },
            Predicate::VolumeToArea {
                relation: Relation::Less,
                more_than: 8,
            },
            Predicate::PrimePrism { more_than: 2 },
            Predicate::FarApart { span: (3, 3) },
        ];
        for p in &predicates {
            assert!(!p.evaluate(&[], &[]), "{} accepted no groups", p.family());
            assert!(
                !p.evaluate(&[Group::default()], &[]),
                "{} accepted an empty group",
                p.family()
            );
        }
    }

    #[test]
    fn shape_at_min_anchor_matches_translated_cube() {
        let p = Predicate::ShapeAtAnchor {
            cells: 8,
            anchor: Anchor::Min,
            pattern: CUBE,
        };
        assert!(p.evaluate(&[cuboid((0, 0, 0), (2, 2, 2))], &[]));
        assert!(p.evaluate(&[cuboid((7, 3, 5), (2, 2, 2))], &[]));
        // Right count, wrong shape.
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (8, 1, 1))], &[]));
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (4, 2, 1))], &[]));
    }

    #[test]
    fn shape_at_midpoint_anchor_matches_plus() {
        let p = Predicate::ShapeAtAnchor {
            cells: 7,
            anchor: Anchor::Midpoint,
            pattern: PLUS,
        };
        let plus = group(&[
            (5, 1, 5),
            (6, 1, 5),
            (4, 1, 5),
            (5, 2, 5),
            (5, 0, 5),
            (5, 1, 6),
            (5, 1, 4),
        ]);
        assert!(p.evaluate(&[plus], &[]));
        // Seven crates, one arm bent: midpoint moves and the pattern breaks.
        let bent = group(&[
            (5, 1, 5),
            (6, 1, 5),
            (4, 1, 5),
            (5, 2, 5),
            (5, 0, 5),
            (5, 1, 6),
            (6, 1, 6),
        ]);
        assert!(!p.evaluate(&[bent], &[]));
    }

    #[test]
    fn doubled_prism_requires_solid_box() {
        let p = Predicate::DoubledPrism;
        let solid = cuboid((3, 0, 3), (2, 4, 2));
        assert!(p.evaluate(&[solid.clone()], &[]));
        assert!(p.evaluate(&[cuboid((0, 0, 0), (1, 2, 1))], &[]));
        assert!(p.evaluate(&[cuboid((0, 0, 0), (3, 6, 3))], &[]));

        let mut hollow = solid;
        hollow.remove(&VoxelCoord::new(3, 1, 3));
        assert!(!p.evaluate(&[hollow], &[]));
        // Width != depth.
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (2, 4, 3))], &[]));
        // Height not twice the width.
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (2, 3, 2))], &[]));
    }

    #[test]
    fn flat_square_detects_its_axis() {
        let p = Predicate::FlatSquare { more_than: 1 };
        // Floating floor: flat in y.
        assert!(p.evaluate(&[cuboid((2, 4, 2), (3, 1, 3))], &[]));
        // Standing wall: flat in z.
        assert!(p.evaluate(&[cuboid((0, 0, 6), (2, 2, 1))], &[]));
        // Flat in x.
        assert!(p.evaluate(&[cuboid((1, 0, 0), (1, 4, 4))], &[]));
        // A single crate is not a platform.
        assert!(!p.evaluate(&[group(&[(1, 1, 1)])], &[]));
        // Rectangle, not a square.
        assert!(!p.evaluate(&[cuboid((0, 3, 0), (3, 1, 2))], &[]));
        // Square outline with a hole.
        let mut ring = cuboid((0, 3, 0), (3, 1, 3));
        ring.remove(&VoxelCoord::new(1, 3, 1));
        assert!(!p.evaluate(&[ring], &[]));
        // Two layers thick.
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (2, 2, 2))], &[]));
    }

    #[test]
    fn ground_pattern_matches_checkerboard() {
        const CHECKER: &[Offset] = &[(0, 0, 0), (2, 0, 0), (0, 0, 2), (1, 0, 1), (2, 0, 2)];
        let p = Predicate::GroundPattern {
            groups: 5,
            pattern: CHECKER,
        };
        let board = singles(&[(4, 0, 4), (6, 0, 4), (4, 0, 6), (5, 0, 5), (6, 0, 6)]);
        assert!(p.evaluate(&board, &[]));
        // Lifted off the ground.
        let floating = singles(&[(4, 1, 4), (6, 1, 4), (4, 1, 6), (5, 1, 5), (6, 1, 6)]);
        assert!(!p.evaluate(&floating, &[]));
        // Extra crate.
        let mut extra = board.clone();
        extra.push(group(&[(9, 0, 9)]));
        assert!(!p.evaluate(&extra, &[]));
    }

    #[test]
    fn preserve_requires_initial_and_any_of() {
        let initial = [VoxelCoord::new(5, 0, 5), VoxelCoord::new(5, 1, 5)];
        let p = Predicate::Preserve {
            cells: 3,
            required: vec![],
            any_of: vec![VoxelCoord::new(6, 0, 5), VoxelCoord::new(5, 2, 5)],
        };
        assert!(p.evaluate(&[group(&[(5, 0, 5), (5, 1, 5), (5, 2, 5)])], &initial));
        assert!(p.evaluate(&[group(&[(5, 0, 5), (5, 1, 5), (6, 0, 5)])], &initial));
        // Valid size but not one of the allowed additions.
        assert!(!p.evaluate(&[group(&[(5, 0, 5), (5, 1, 5), (4, 0, 5)])], &initial));
        // Starting crate removed.
        assert!(!p.evaluate(&[group(&[(5, 1, 5), (5, 2, 5), (6, 2, 5)])], &initial));
    }

    #[test]
    fn preserve_with_required_cells() {
        let initial = [VoxelCoord::new(0, 0, 0)];
        let p = Predicate::Preserve {
            cells: 3,
            required: vec![VoxelCoord::new(1, 0, 0), VoxelCoord::new(2, 0, 0)],
            any_of: vec![],
        };
        assert!(p.evaluate(&[group(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)])], &initial));
        assert!(!p.evaluate(&[group(&[(0, 0, 0), (1, 0, 0), (1, 1, 0)])], &initial));
    }

    #[test]
    fn exact_cells_rejects_supersets() {
        let target = vec![VoxelCoord::new(1, 0, 1), VoxelCoord::new(1, 1, 1)];
        let p = Predicate::ExactCells {
            target: target.clone(),
        };
        assert!(p.evaluate(&[group(&[(1, 0, 1), (1, 1, 1)])], &[]));
        assert!(!p.evaluate(&[group(&[(1, 0, 1), (1, 1, 1), (1, 2, 1)])], &[]));
        assert!(!p.evaluate(&[group(&[(1, 0, 1)]), group(&[(3, 0, 3)])], &[]));
    }

    #[test]
    fn degree_two_ring() {
        let p = Predicate::Degree {
            cells: 8,
            degree: 2,
            runs: None,
        };
        let mut ring = cuboid((0, 0, 0), (3, 1, 3));
        ring.remove(&VoxelCoord::new(1, 0, 1));
        assert!(p.evaluate(&[ring], &[]));
        // Eight crates in a line: the ends touch only one.
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (8, 1, 1))], &[]));
        // Full 2x2x2 cube: everyone touches three.
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (2, 2, 2))], &[]));
    }

    #[test]
    fn degree_with_runs_of_three() {
        let p = Predicate::Degree {
            cells: 16,
            degree: 2,
            runs: Some(&[1, 3]),
        };
        // A loop over eight edges of a 3x3x3 cube.
        let skew = group(&[
            (0, 0, 0),
            (1, 0, 0),
            (2, 0, 0),
            (2, 1, 0),
            (2, 2, 0),
            (2, 2, 1),
            (2, 2, 2),
            (2, 1, 2),
            (2, 0, 2),
            (1, 0, 2),
            (0, 0, 2),
            (0, 1, 2),
            (0, 2, 2),
            (0, 2, 1),
            (0, 2, 0),
            (0, 1, 0),
        ]);
        assert!(p.evaluate(&[skew], &[]));

        // A flat 5x5 ring has 16 crates of degree 2 but runs of 5.
        let mut ring = cuboid((0, 0, 0), (5, 1, 5));
        for x in 1..4 {
            for z in 1..4 {
                ring.remove(&VoxelCoord::new(x, 0, z));
            }
        }
        assert_eq!(ring.len(), 16);
        assert!(!p.evaluate(&[ring], &[]));
    }

    #[test]
    fn distinct_axes_four_queens() {
        let p = Predicate::DistinctAxes { crates: 4, span: 3 };
        let queens = singles(&[(0, 0, 1), (1, 2, 0), (2, 3, 3), (3, 1, 2)]);
        assert!(p.evaluate(&queens, &[]));
        // Shared x value.
        let clash = singles(&[(0, 0, 1), (0, 2, 0), (2, 3, 3), (3, 1, 2)]);
        assert!(!p.evaluate(&clash, &[]));
        // Distinct but spread over a 5-wide box.
        let loose = singles(&[(0, 0, 1), (1, 2, 0), (2, 3, 3), (4, 1, 2)]);
        assert!(!p.evaluate(&loose, &[]));
    }

    #[test]
    fn monotonic_layers_strictly_grow() {
        let p = Predicate::MonotonicLayers { layers: 5 };
        let mut tower = Group::default();
        for y in 0..5 {
            for x in 0..=y {
                tower.insert(VoxelCoord::new(x, y, 0));
            }
        }
        assert!(p.evaluate(&[tower.clone()], &[]));

        // Equal layers are not "more".
        let mut flat_top = tower.clone();
        flat_top.remove(&VoxelCoord::new(4, 4, 0));
        assert!(!p.evaluate(&[flat_top], &[]));

        // Six layers.
        let mut tall = tower;
        for x in 0..6 {
            tall.insert(VoxelCoord::new(x, 5, 0));
        }
        assert!(!p.evaluate(&[tall], &[]));
    }

    #[test]
    fn line_sizes_compare_multisets() {
        let p = Predicate::LineSizes { sizes: &[1, 2, 4] };
        let lines = vec![
            group(&[(0, 0, 0)]),
            cuboid((0, 0, 2), (2, 1, 1)),
            cuboid((0, 0, 4), (1, 4, 1)),
        ];
        assert!(p.evaluate(&lines, &[]));

        // A duplicate size is not the same multiset.
        let mut dup = lines.clone();
        dup.push(group(&[(9, 0, 9)]));
        assert!(!p.evaluate(&dup, &[]));

        // Right sizes, but the four is a square.
        let square = vec![
            group(&[(0, 0, 0)]),
            cuboid((0, 0, 2), (2, 1, 1)),
            cuboid((0, 0, 4), (2, 1, 2)),
        ];
        assert!(!p.evaluate(&square, &[]));
    }

    #[test]
    fn volume_to_area_boundaries() {
        let under = Predicate::VolumeToArea {
            relation: Relation::Less,
            more_than: 8,
        };
        let equal = Predicate::VolumeToArea {
            relation: Relation::Equal,
            more_than: 8,
        };
        let over = Predicate::VolumeToArea {
            relation: Relation::Greater,
            more_than: 8,
        };

        let rod = [cuboid((0, 0, 0), (1, 1, 9))];
        assert!(under.evaluate(&rod, &[]));
        assert!(!over.evaluate(&rod, &[]));

        // 4x4x4: volume 64, area 96, still under.
        let cube4 = [cuboid((0, 0, 0), (4, 4, 4))];
        assert!(under.evaluate(&cube4, &[]));

        // 6x6x6: volume 216 == area 216.
        let cube6 = [cuboid((0, 0, 0), (6, 6, 6))];
        assert!(equal.evaluate(&cube6, &[]));
        assert!(!under.evaluate(&cube6, &[]));
        assert!(!over.evaluate(&cube6, &[]));

        // 7x7x7: volume 343, area 294.
        let cube7 = [cuboid((0, 0, 0), (7, 7, 7))];
        assert!(over.evaluate(&cube7, &[]));
        assert!(!under.evaluate(&cube7, &[]));

        // Eight crates is not "more than 8".
        assert!(!under.evaluate(&[cuboid((0, 0, 0), (2, 2, 2))], &[]));
    }

    #[test]
    fn prime_prism_only_accepts_prime_solids() {
        let p = Predicate::PrimePrism { more_than: 10 };
        assert!(p.evaluate(&[cuboid((0, 0, 0), (11, 1, 1))], &[]));
        assert!(p.evaluate(&[cuboid((0, 0, 0), (1, 13, 1))], &[]));
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (12, 1, 1))], &[]));
        assert!(!p.evaluate(&[cuboid((0, 0, 0), (7, 1, 1))], &[]));
        // Eleven crates in an L: prime, not a prism.
        let mut l = cuboid((0, 0, 0), (10, 1, 1));
        l.insert(VoxelCoord::new(0, 1, 0));
        assert!(!p.evaluate(&[l], &[]));
    }

    #[test]
    fn primes() {
        let found: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(found, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn far_apart_needs_opposite_ground_corners() {
        let p = Predicate::FarApart { span: (20, 20) };
        assert!(p.evaluate(&singles(&[(0, 0, 0), (20, 0, 20)]), &[]));
        assert!(p.evaluate(&singles(&[(20, 0, 0), (0, 0, 20)]), &[]));
        assert!(!p.evaluate(&singles(&[(0, 0, 0), (19, 0, 20)]), &[]));
        assert!(!p.evaluate(&singles(&[(0, 1, 0), (20, 0, 20)]), &[]));
        assert!(!p.evaluate(&singles(&[(0, 0, 0), (20, 0, 20), (5, 0, 5)]), &[]));
    }

    #[test]
    fn validate_rejects_world_cells_outside_bounds() {
        let p = Predicate::ExactCells {
            target: vec![VoxelCoord::new(0, 0, 0), VoxelCoord::new(10, 0, 0)],
        };
        assert!(p.validate((10, 10, 10), &[]).is_err());
        assert!(p.validate((11, 10, 10), &[]).is_ok());
    }

    #[test]
    fn validate_rejects_unfittable_shapes() {
        assert!(
            Predicate::LineSizes { sizes: &[1, 20] }
                .validate((12, 12, 12), &[])
                .is_err()
        );
        assert!(
            Predicate::DistinctAxes { crates: 4, span: 3 }
                .validate((3, 8, 8), &[])
                .is_err()
        );
        assert!(
            Predicate::MonotonicLayers { layers: 5 }
                .validate((8, 4, 8), &[])
                .is_err()
        );
        assert!(
            Predicate::FarApart { span: (10, 10) }
                .validate((10, 4, 11), &[])
                .is_err()
        );
        assert!(
            Predicate::ShapeAtAnchor {
                cells: 8,
                anchor: Anchor::Min,
                pattern: CUBE,
            }
            .validate((1, 4, 4), &[])
            .is_err()
        );
    }

    #[test]
    fn validate_rejects_preserve_that_cannot_fit_its_kept_cells() {
        let initial = [VoxelCoord::new(0, 0, 0), VoxelCoord::new(1, 0, 0)];
        let p = Predicate::Preserve {
            cells: 2,
            required: vec![VoxelCoord::new(2, 0, 0)],
            any_of: vec![],
        };
        assert!(p.validate((4, 4, 4), &initial).is_err());
    }
}
