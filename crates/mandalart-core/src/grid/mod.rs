//! Grid topology for the 9x9 board.
//!
//! The 81 positions form a 9x9 matrix, itself a 3x3 arrangement of 3x3
//! sub-grids indexed 0..=8 in row-major order. Position 40 is the absolute
//! center; each sub-grid's own center is a sub-center; everything else is a
//! leaf. The eight non-center positions of the central sub-grid mirror the
//! centers of the other eight sub-grids (the "double board" convention).
//!
//! The position sets and the pair table are small and fixed, so they live
//! here as constants rather than being re-derived per call.

use thiserror::Error;

use mandalart_db::models::CellLevel;

/// Cells per side of the full grid.
pub const GRID_SIZE: i32 = 9;

/// Total cell count of a board.
pub const CELL_COUNT: i32 = 81;

/// The absolute center of the grid, also the center of sub-grid 4.
pub const CENTER_POSITION: i32 = 40;

/// Centers of the eight non-central sub-grids.
///
/// Position 40 is classified `CENTER`, never `SUB_CENTER`.
pub const SUB_CENTER_POSITIONS: [i32; 8] = [10, 13, 16, 37, 43, 64, 67, 70];

/// Centers of all nine sub-grids, indexed by sub-grid.
const SUB_GRID_CENTERS: [i32; 9] = [10, 13, 16, 37, 40, 43, 64, 67, 70];

/// Mirrored pairs: each non-center position of the central sub-grid paired
/// with the center of the sub-grid occupying the same local offset.
const LINKED_PAIRS: [(i32, i32); 8] = [
    (30, 10),
    (31, 13),
    (32, 16),
    (39, 37),
    (41, 43),
    (48, 64),
    (49, 67),
    (50, 70),
];

/// Error returned for positions outside 0..=80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position {0} is outside the 9x9 grid")]
pub struct PositionOutOfRange(pub i32);

fn check(position: i32) -> Result<i32, PositionOutOfRange> {
    if (0..CELL_COUNT).contains(&position) {
        Ok(position)
    } else {
        Err(PositionOutOfRange(position))
    }
}

/// Classify a position into its semantic role.
///
/// Exactly one position is `CENTER`, eight are `SUB_CENTER`, and the
/// remaining 72 are `LEAF`.
pub fn classify(position: i32) -> Result<CellLevel, PositionOutOfRange> {
    let position = check(position)?;
    if position == CENTER_POSITION {
        Ok(CellLevel::Center)
    } else if SUB_CENTER_POSITIONS.contains(&position) {
        Ok(CellLevel::SubCenter)
    } else {
        Ok(CellLevel::Leaf)
    }
}

/// Row and column of a position in the 9x9 matrix.
pub fn row_col(position: i32) -> Result<(i32, i32), PositionOutOfRange> {
    let position = check(position)?;
    Ok((position / GRID_SIZE, position % GRID_SIZE))
}

/// Index of the 3x3 sub-grid containing a position.
pub fn sub_grid_index(position: i32) -> Result<i32, PositionOutOfRange> {
    let (row, col) = row_col(position)?;
    Ok((row / 3) * 3 + col / 3)
}

/// Center position of a sub-grid. `None` for indexes outside 0..=8.
pub fn sub_center_position(sub_grid: i32) -> Option<i32> {
    usize::try_from(sub_grid)
        .ok()
        .and_then(|i| SUB_GRID_CENTERS.get(i))
        .copied()
}

/// The mirrored counterpart of a position, if it has one.
///
/// Defined (`Some`) for exactly the sixteen positions in the pair table:
/// the outer ring of the central sub-grid and the eight sub-centers. The
/// mapping is symmetric.
pub fn linked_position(position: i32) -> Result<Option<i32>, PositionOutOfRange> {
    let position = check(position)?;
    Ok(LINKED_PAIRS.iter().find_map(|&(ring, center)| {
        if position == ring {
            Some(center)
        } else if position == center {
            Some(ring)
        } else {
            None
        }
    }))
}
