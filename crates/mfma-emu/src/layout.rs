//! Operand and result layout of `mfma_f32_16x16x4f32`.
//!
//! A\[m,k\] = a_tile\[16k + m\], B\[k,n\] = b_tile\[16k + n\], and lane `l`
//! holds C\[4(l/16) + p, l%16\] in accumulator element `p`.
//!
//! These formulas are the instruction's register layout. They are fixed,
//! not a tuning choice.

use crate::lane::{LaneId, LANES_PER_SUBGROUP};

/// Rows of the A and C tiles.
pub const TILE_M: usize = 16;
/// Columns of the B and C tiles.
pub const TILE_N: usize = 16;
/// Reduction depth.
pub const TILE_K: usize = 4;
/// Accumulator elements held by each lane.
pub const ACC_WIDTH: usize = 4;

/// Four `f32` accumulator elements owned by one lane.
pub type Floatx4 = [f32; ACC_WIDTH];

/// Output-tile coordinates a lane is responsible for.
///
/// The lane accumulates rows `m..m + 4` of column `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub m: usize,
    pub n: usize,
}

impl TileCoord {
    #[must_use]
    pub fn for_lane(lane: LaneId) -> Self {
        let l = lane.index();
        Self {
            m: ACC_WIDTH * (l / TILE_N),
            n: l % TILE_N,
        }
    }
}

/// Staging slot holding A\[m + p, k\].
#[must_use]
pub fn a_slot(k: usize, m: usize, p: usize) -> usize {
    TILE_M * k + m + p
}

/// Staging slot holding B\[k, n\].
#[must_use]
pub fn b_slot(k: usize, n: usize) -> usize {
    TILE_N * k + n
}

/// (row, col) of C held by accumulator element `p` of `lane`.
#[must_use]
pub fn c_row_col(lane: LaneId, p: usize) -> (usize, usize) {
    let coord = TileCoord::for_lane(lane);
    (coord.m + p, coord.n)
}

/// Inverse of [`c_row_col`]: which lane and element hold C\[row, col\].
///
/// # Panics
/// Panics if `row >= TILE_M` or `col >= TILE_N`.
#[must_use]
pub fn c_lane(row: usize, col: usize) -> (usize, usize) {
    assert!(row < TILE_M, "row {row} outside the {TILE_M}-row tile");
    assert!(col < TILE_N, "col {col} outside the {TILE_N}-column tile");
    let lane = TILE_N * (row / ACC_WIDTH) + col;
    debug_assert!(lane < LANES_PER_SUBGROUP);
    (lane, row % ACC_WIDTH)
}
