//! Static corner-state data for the six-pack sheet.
//!
//! A six-pack sheet is 2×3 tiles; every tile is cut into quadrants, giving a
//! 4×6 grid of sub-tiles addressed `(x, y)`. An output tile is a recipe of four
//! sub-tiles: top-left, top-right, bottom-left, bottom-right.
//!
//! Table order matters: map-editor descriptors address tiles by their index in
//! the produced sheet.

/// Sub-tile coordinate `(x, y)` in the anchor grid.
pub type SubTile = (u8, u8);

/// Composition recipe for one output tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerState {
    /// Four quadrants in order top-left, top-right, bottom-left, bottom-right.
    Composed([SubTile; 4]),
    /// Leave the destination untouched.
    Skip,
}

impl CornerState {
    pub fn quadrants(&self) -> Option<&[SubTile; 4]> {
        match self {
            CornerState::Composed(quads) => Some(quads),
            CornerState::Skip => None,
        }
    }
}

const fn quad(tl: SubTile, tr: SubTile, bl: SubTile, br: SubTile) -> CornerState {
    CornerState::Composed([tl, tr, bl, br])
}

/// Number of corner states per terrain half of [`CORNER_STATES`].
pub const TERRAIN_HALF: usize = 14;

/// The 28 corner states: terrain 1 in `0..14`, terrain 2 in `14..28`.
///
/// Entry 0 is filled terrain 1, entry 1 a small terrain 2 patch on top of
/// terrain 1. Entry 14 is filled terrain 2, entry 15 a small terrain 1 patch.
pub const CORNER_STATES: [CornerState; 28] = [
    // terrain 1
    quad((1, 3), (2, 3), (1, 4), (2, 4)),
    quad((3, 0), (2, 0), (1, 4), (2, 4)),
    quad((3, 3), (0, 5), (3, 0), (2, 2)),
    quad((3, 3), (0, 0), (3, 0), (2, 2)),
    quad((3, 3), (0, 3), (3, 4), (0, 4)),
    quad((3, 3), (0, 5), (3, 4), (0, 2)),
    quad((3, 3), (0, 0), (3, 4), (0, 2)),
    quad((3, 3), (0, 5), (3, 4), (1, 1)),
    quad((3, 3), (0, 0), (3, 4), (1, 1)),
    quad((3, 5), (0, 5), (3, 2), (0, 2)),
    quad((3, 5), (1, 0), (3, 2), (0, 2)),
    quad((3, 5), (1, 0), (3, 2), (1, 1)),
    quad((3, 5), (1, 0), (0, 1), (0, 2)),
    quad((3, 5), (1, 0), (1, 0), (1, 1)),
    // terrain 2
    quad((0, 0), (1, 0), (0, 1), (1, 1)),
    quad((0, 5), (3, 5), (0, 1), (1, 1)),
    quad((0, 4), (3, 0), (0, 5), (1, 5)),
    quad((0, 4), (1, 4), (0, 5), (1, 5)),
    quad((0, 3), (3, 3), (0, 4), (3, 4)),
    quad((0, 3), (3, 0), (0, 4), (3, 1)),
    quad((0, 3), (2, 3), (0, 4), (3, 1)),
    quad((0, 3), (3, 0), (0, 4), (2, 4)),
    quad((0, 3), (2, 3), (0, 4), (2, 4)),
    quad((2, 0), (3, 0), (2, 1), (3, 1)),
    quad((2, 0), (2, 3), (2, 1), (3, 1)),
    quad((2, 0), (2, 3), (2, 1), (2, 4)),
    quad((2, 0), (2, 3), (1, 4), (3, 1)),
    quad((2, 0), (2, 3), (1, 4), (2, 4)),
];

const T: [CornerState; 28] = CORNER_STATES;

/// 16-tile terrain 1 view: the terrain 1 half, then filled terrain 2 (15) and
/// the small terrain 1 patch (14).
pub const TERRAIN1_16: [CornerState; 16] = [
    T[0], T[1], T[2], T[3], T[4], T[5], T[6], T[7], T[8], T[9], T[10], T[11], T[12], T[13],
    T[15], T[14],
];

/// 16-tile terrain 2 view: the terrain 2 half, then the small terrain 2 patch
/// (1) and filled terrain 1 (0).
pub const TERRAIN2_16: [CornerState; 16] = [
    T[14], T[15], T[16], T[17], T[18], T[19], T[20], T[21], T[22], T[23], T[24], T[25], T[26],
    T[27], T[1], T[0],
];

/// Where a 48-tile base comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseTile {
    /// Index into [`CORNER_STATES`].
    Table(usize),
    /// Dual-terrain contact pattern with no counterpart in the 28 table.
    Literal(CornerState),
}

impl BaseTile {
    pub fn corner_state(&self) -> CornerState {
        match *self {
            BaseTile::Table(index) => CORNER_STATES[index],
            BaseTile::Literal(state) => state,
        }
    }
}

/// One composed base tile and the cells that receive its left rotations.
///
/// `rotations[0]` receives the base rotated once, `rotations[1]` twice, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub base: BaseTile,
    /// `(col, row)` of the unrotated base.
    pub cell: (u32, u32),
    pub rotations: &'static [(u32, u32)],
}

const fn table(index: usize, cell: (u32, u32), rotations: &'static [(u32, u32)]) -> Placement {
    Placement {
        base: BaseTile::Table(index),
        cell,
        rotations,
    }
}

const fn literal(
    state: CornerState,
    cell: (u32, u32),
    rotations: &'static [(u32, u32)],
) -> Placement {
    Placement {
        base: BaseTile::Literal(state),
        cell,
        rotations,
    }
}

/// Rotation targets shared by both terrain variants of the 48 layout.
mod cells {
    pub const R0: &[(u32, u32)] = &[(3, 3), (0, 0), (1, 3)];
    pub const R1: &[(u32, u32)] = &[(2, 3)];
    pub const R3: &[(u32, u32)] = &[(3, 2), (3, 0), (1, 0)];
    pub const R4: &[(u32, u32)] = &[(2, 2), (3, 1), (2, 0)];
    pub const R6: &[(u32, u32)] = &[(4, 3), (7, 3), (7, 0)];
    pub const R7: &[(u32, u32)] = &[(5, 2), (6, 2), (6, 1)];
    pub const R8: &[(u32, u32)] = &[(4, 2), (6, 3), (7, 1)];
    pub const R9: &[(u32, u32)] = &[(4, 1), (5, 3), (7, 2)];
    pub const R10: &[(u32, u32)] = &[(11, 3), (11, 0), (8, 0)];
    pub const R11: &[(u32, u32)] = &[(8, 2), (10, 3), (11, 2)];
    pub const R12: &[(u32, u32)] = &[(9, 3), (11, 1), (10, 0)];
    pub const R15: &[(u32, u32)] = &[(10, 2)];
    pub const NONE: &[(u32, u32)] = &[];
}

use cells::*;

/// 12×4 placement plan, terrain 1 in the foreground.
pub const TERRAIN1_48: [Placement; 16] = [
    table(1, (0, 2), R0),
    table(4, (0, 1), R1),
    literal(quad((3, 1), (2, 1), (3, 0), (2, 0)), (0, 3), NONE),
    table(2, (1, 2), R3),
    table(5, (1, 1), R4),
    table(9, (2, 1), NONE),
    literal(quad((0, 0), (0, 5), (3, 2), (0, 2)), (4, 0), R6),
    table(13, (5, 1), R7),
    literal(quad((1, 5), (2, 5), (3, 2), (1, 1)), (5, 0), R8),
    literal(quad((1, 5), (2, 5), (0, 1), (0, 2)), (6, 0), R9),
    table(3, (8, 3), R10),
    literal(quad((3, 5), (0, 5), (0, 1), (1, 1)), (9, 0), R11),
    table(8, (8, 1), R12),
    table(0, (10, 1), NONE),
    table(14, (9, 2), NONE),
    table(12, (9, 1), R15),
];

/// 12×4 placement plan, terrain 2 in the foreground.
pub const TERRAIN2_48: [Placement; 16] = [
    table(15, (0, 2), R0),
    table(18, (0, 1), R1),
    literal(quad((0, 2), (3, 2), (0, 5), (3, 5)), (0, 3), NONE),
    table(16, (1, 2), R3),
    table(19, (1, 1), R4),
    table(23, (2, 1), NONE),
    literal(quad((1, 3), (3, 0), (2, 1), (3, 1)), (4, 0), R6),
    table(27, (5, 1), R7),
    literal(quad((1, 2), (2, 2), (2, 1), (2, 4)), (5, 0), R8),
    literal(quad((1, 2), (2, 2), (1, 4), (3, 1)), (6, 0), R9),
    table(17, (8, 3), R10),
    literal(quad((2, 0), (3, 0), (1, 4), (2, 4)), (9, 0), R11),
    table(22, (8, 1), R12),
    table(14, (10, 1), NONE),
    table(0, (9, 2), NONE),
    table(26, (9, 1), R15),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_states() -> Vec<CornerState> {
        let mut states: Vec<CornerState> = CORNER_STATES.to_vec();
        for plan in [&TERRAIN1_48, &TERRAIN2_48] {
            states.extend(plan.iter().map(|p| p.base.corner_state()));
        }
        states
    }

    #[test]
    fn test_coordinates_fit_six_pack_grid() {
        for state in all_states() {
            for &(x, y) in state.quadrants().unwrap() {
                assert!(x < 4 && y < 6, "sub-tile ({}, {}) outside 4x6 grid", x, y);
            }
        }
    }

    #[test]
    fn test_sixteen_views() {
        assert_eq!(&TERRAIN1_16[..TERRAIN_HALF], &CORNER_STATES[..TERRAIN_HALF]);
        assert_eq!(TERRAIN1_16[14], CORNER_STATES[15]);
        assert_eq!(TERRAIN1_16[15], CORNER_STATES[14]);

        assert_eq!(&TERRAIN2_16[..TERRAIN_HALF], &CORNER_STATES[TERRAIN_HALF..]);
        assert_eq!(TERRAIN2_16[14], CORNER_STATES[1]);
        assert_eq!(TERRAIN2_16[15], CORNER_STATES[0]);
    }

    #[test]
    fn test_forty_eight_plans_cover_every_cell_once() {
        for plan in [&TERRAIN1_48, &TERRAIN2_48] {
            let mut seen = HashSet::new();
            for placement in plan.iter() {
                assert!(placement.rotations.len() <= 3);
                for &cell in std::iter::once(&placement.cell).chain(placement.rotations) {
                    assert!(cell.0 < 12 && cell.1 < 4);
                    assert!(seen.insert(cell), "cell {:?} placed twice", cell);
                }
            }
            assert_eq!(seen.len(), 48);
        }
    }

    #[test]
    fn test_plans_mirror_each_other() {
        for (t1, t2) in TERRAIN1_48.iter().zip(TERRAIN2_48.iter()) {
            assert_eq!(t1.cell, t2.cell);
            assert_eq!(t1.rotations, t2.rotations);
            assert_eq!(
                matches!(t1.base, BaseTile::Literal(_)),
                matches!(t2.base, BaseTile::Literal(_))
            );
        }
        // filled tiles swap roles between the variants
        assert_eq!(TERRAIN1_48[13].base, BaseTile::Table(0));
        assert_eq!(TERRAIN2_48[13].base, BaseTile::Table(14));
    }

    #[test]
    fn test_no_skipped_entries() {
        assert!(all_states().iter().all(|s| *s != CornerState::Skip));
    }
}
