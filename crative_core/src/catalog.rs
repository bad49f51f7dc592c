// The standard challenge table: twenty levels in play order.
//
// Shape data is static: offset lists relative to an anchor. For most
// levels the anchor comes from the player's own build (see
// `predicate::Anchor`). Five levels (mirror-elbow, connect-towers,
// add-opposite, cupside-down, flip-both) start the player with crates at
// fixed world positions, so their offsets are resolved here against the
// world anchor `(W/2, 0, D/2)` of the grid the registry is built for.
// far-apart likewise bakes in the grid's ground spans.
//
// `ChallengeRegistry::standard()` runs the table through the normal
// registry validation, so a grid too small for the catalog (a 20-crate line
// needs a 20-wide axis) is rejected at startup.

use crate::challenge::{Challenge, ChallengeRegistry};
use crate::error::{CrativeError, Result};
use crate::grid::check_bounds;
use crate::predicate::{Anchor, Predicate, Relation};
use crate::types::{Offset, VoxelCoord};

/// Level names of the standard table, in play order.
pub const STANDARD_LEVELS: [&str; 20] = [
    "cube8",
    "floating-square",
    "doubled-prism",
    "checker3",
    "mirror-elbow",
    "outline",
    "monotonic-tower",
    "connect-towers",
    "add-opposite",
    "plus3",
    "cupside-down",
    "flip-both",
    "four-queens",
    "loop3",
    "factor20",
    "prime-prism",
    "volume-under-area",
    "volume-equals-area",
    "volume-over-area",
    "far-apart",
];

/// Ground-level center of a grid: `(W/2, 0, D/2)`, rounded down.
pub fn world_anchor(bounds: (u32, u32, u32)) -> VoxelCoord {
    VoxelCoord::new((bounds.0 / 2) as i32, 0, (bounds.2 / 2) as i32)
}

/// Offsets placed around `anchor`, for the level called `name`.
fn resolve(name: &str, anchor: VoxelCoord, offsets: &[Offset]) -> Result<Vec<VoxelCoord>> {
    offsets
        .iter()
        .map(|&o| {
            anchor.checked_offset(o).ok_or_else(|| {
                CrativeError::malformed(name, format!("offset {o:?} from {anchor} overflows"))
            })
        })
        .collect()
}

/// Every offset in the inclusive box `min..=max`.
fn cuboid(min: Offset, max: Offset) -> Vec<Offset> {
    let mut cells = Vec::new();
    for y in min.1..=max.1 {
        for z in min.2..=max.2 {
            for x in min.0..=max.0 {
                cells.push((x, y, z));
            }
        }
    }
    cells
}

// ---------------------------------------------------------------------------
// Static shape data
// ---------------------------------------------------------------------------

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

const CHECKERBOARD: &[Offset] = &[(0, 0, 0), (2, 0, 0), (0, 0, 2), (1, 0, 1), (2, 0, 2)];

const ELBOW: &[Offset] = &[(0, 0, 0), (0, 1, 0), (1, 1, 0)];
const ELBOW_MIRRORS: &[Offset] = &[(1, 0, 0), (-1, 1, 0), (0, 2, 0)];

const TOWERS: &[Offset] = &[
    (-1, 0, -1),
    (1, 0, 1),
    (1, 1, 1),
    (1, 0, -1),
    (1, 1, -1),
    (1, 2, -1),
    (-1, 0, 1),
    (-1, 1, 1),
    (-1, 2, 1),
    (-1, 3, 1),
];

const ARCH: &[Offset] = &[
    (0, 0, 0),
    (0, 1, 0),
    (-1, 0, 0),
    (-1, 1, 0),
    (-1, 2, 0),
    (1, 0, 0),
    (1, 1, 0),
    (1, 2, 0),
];
const ARCH_TURNED: &[Offset] = &[
    (0, 2, 0),
    (0, 3, 0),
    (0, 1, 1),
    (0, 2, 1),
    (0, 3, 1),
    (0, 1, -1),
    (0, 2, -1),
    (0, 3, -1),
];

const HOOK: &[Offset] = &[
    (0, 0, 0),
    (1, 0, 0),
    (2, 0, 0),
    (3, 0, 0),
    (0, 1, 0),
    (0, 2, 0),
    (1, 2, 0),
    (2, 2, 0),
    (0, 3, 0),
    (0, 4, 0),
    (-1, 4, 0),
];
const HOOK_FLIPPED: &[Offset] = &[
    (0, 4, 0),
    (-1, 4, 0),
    (-2, 4, 0),
    (-3, 4, 0),
    (0, 3, 0),
    (0, 2, 0),
    (-1, 2, 0),
    (-2, 2, 0),
    (0, 1, 0),
    (0, 0, 0),
    (1, 0, 0),
];

const LOOP_RUNS: &[i32] = &[1, 3];
const FACTORS_OF_20: &[usize] = &[1, 2, 4, 5, 10, 20];

/// A four-high box, open underneath, with a single crate inside it.
fn box_with_crate() -> Vec<Offset> {
    let mut cells = vec![(0, 1, 0)];
    for x in [-2, 2] {
        cells.extend(cuboid((x, 0, -2), (x, 3, 2)));
    }
    for z in [-2, 2] {
        cells.extend(cuboid((-1, 0, z), (1, 3, z)));
    }
    cells.extend(cuboid((-1, 3, -1), (1, 3, 1)));
    cells
}

/// The inside of `box_with_crate()`, inverted: a 3x3x3 block with a hole
/// where the lone crate used to be.
fn inverted_box() -> Vec<Offset> {
    cuboid((-1, 0, -1), (1, 2, 1))
        .into_iter()
        .filter(|&o| o != (0, 1, 0))
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The twenty standard challenges for a grid of `bounds`. Only the bounds
/// are checked here; the registry validates the rules themselves.
pub fn standard_challenges(bounds: (u32, u32, u32)) -> Result<Vec<Challenge>> {
    check_bounds(bounds)?;
    let c = world_anchor(bounds);
    // Both extents are in 1..=i32::MAX after the check.
    let ground_span = (bounds.0 as i32 - 1, bounds.2 as i32 - 1);

    Ok(vec![
        Challenge::new(
            "cube8",
            "Make a cube out of 8 crates.",
            vec![],
            Predicate::ShapeAtAnchor {
                cells: 8,
                anchor: Anchor::Min,
                pattern: CUBE,
            },
        ),
        Challenge::new(
            "floating-square",
            "Create a floating square platform using more than 1 crate. \
             Oh, by the way, you can delete a crate by right-clicking on it.",
            vec![],
            Predicate::FlatSquare { more_than: 1 },
        ),
        Challenge::new(
            "doubled-prism",
            "Create a rectangular prism that follows these rules: the height is \
             twice the width, and the width and depth are the same.",
            vec![],
            Predicate::DoubledPrism,
        ),
        Challenge::new(
            "checker3",
            "Using 5 blocks, make a 3 by 3 checkerboard with all blocks touching the ground.",
            vec![],
            Predicate::GroundPattern {
                groups: 5,
                pattern: CHECKERBOARD,
            },
        ),
        Challenge::new(
            "mirror-elbow",
            "Add 1 crate to create a symmetric structure.",
            resolve("mirror-elbow", c, ELBOW)?,
            Predicate::Preserve {
                cells: 4,
                required: vec![],
                any_of: resolve("mirror-elbow", c, ELBOW_MIRRORS)?,
            },
        ),
        Challenge::new(
            "outline",
            "Make a structure that uses 8 crates, with each touching 2 others.",
            vec![],
            Predicate::Degree {
                cells: 8,
                degree: 2,
                runs: None,
            },
        ),
        Challenge::new(
            "monotonic-tower",
            "Create a structure with 5 levels, with each level having more crates \
             than the level below.",
            vec![],
            Predicate::MonotonicLayers { layers: 5 },
        ),
        Challenge::new(
            "connect-towers",
            "Turn this into one structure by placing only 3 blocks.",
            resolve("connect-towers", c, TOWERS)?,
            Predicate::Preserve {
                cells: TOWERS.len() + 3,
                required: vec![],
                any_of: vec![],
            },
        ),
        Challenge::new(
            "add-opposite",
            "Interlock this structure with its own replica, flipped upside down \
             and turned to be perpendicular.",
            resolve("add-opposite", c, ARCH)?,
            Predicate::Preserve {
                cells: ARCH.len() + ARCH_TURNED.len(),
                required: resolve("add-opposite", c, ARCH_TURNED)?,
                any_of: vec![],
            },
        ),
        Challenge::new(
            "plus3",
            "Create a structure out of 7 crates, with 6 of them touching only 1 other crate.",
            vec![],
            Predicate::ShapeAtAnchor {
                cells: 7,
                anchor: Anchor::Midpoint,
                pattern: PLUS,
            },
        ),
        Challenge::new(
            "cupside-down",
            "Replace this box with the opposite of its inside.",
            resolve("cupside-down", c, &box_with_crate())?,
            Predicate::ExactCells {
                target: resolve("cupside-down", c, &inverted_box())?,
            },
        ),
        Challenge::new(
            "flip-both",
            "Flip this structure both horizontal and vertically.",
            resolve("flip-both", c, HOOK)?,
            Predicate::ExactCells {
                target: resolve("flip-both", c, HOOK_FLIPPED)?,
            },
        ),
        Challenge::new(
            "four-queens",
            "Place four crates such that no crate shares an x-coordinate, \
             y-coordinate, or z-coordinate with another. Use as small a space as possible.",
            vec![],
            Predicate::DistinctAxes { crates: 4, span: 3 },
        ),
        Challenge::new(
            "loop3",
            "Create a structure using 16 blocks, such that every crate touches \
             exactly 2 others, and crates appear in runs of 3.",
            vec![],
            Predicate::Degree {
                cells: 16,
                degree: 2,
                runs: Some(LOOP_RUNS),
            },
        ),
        Challenge::new(
            "factor20",
            "Make a line of crates for each of the factors of 20, each being that \
             number of crates long.",
            vec![],
            Predicate::LineSizes {
                sizes: FACTORS_OF_20,
            },
        ),
        Challenge::new(
            "prime-prism",
            "Create a solid rectangular prism using a prime number of crates. \
             Use more than 10 crates.",
            vec![],
            Predicate::PrimePrism { more_than: 10 },
        ),
        Challenge::new(
            "volume-under-area",
            "Create a solid rectangular prism whose volume-to-surface-area ratio \
             is less than 1. Use more than 8 crates.",
            vec![],
            Predicate::VolumeToArea {
                relation: Relation::Less,
                more_than: 8,
            },
        ),
        Challenge::new(
            "volume-equals-area",
            "Create a solid rectangular prism whose volume-to-surface-area ratio \
             is 1. Use more than 8 crates.",
            vec![],
            Predicate::VolumeToArea {
                relation: Relation::Equal,
                more_than: 8,
            },
        ),
        Challenge::new(
            "volume-over-area",
            "Create a solid rectangular prism whose volume-to-surface-area ratio \
             exceeds 1. Use more than 8 crates.",
            vec![],
            Predicate::VolumeToArea {
                relation: Relation::Greater,
                more_than: 8,
            },
        ),
        Challenge::new(
            "far-apart",
            "Place two crates on the ground as far apart from each other as possible.",
            vec![],
            Predicate::FarApart { span: ground_span },
        ),
    ])
}

impl ChallengeRegistry {
    /// The standard twenty-level table for grids of `bounds`.
    pub fn standard(bounds: (u32, u32, u32)) -> Result<Self> {
        Self::new(bounds, standard_challenges(bounds)?)
    }
}
