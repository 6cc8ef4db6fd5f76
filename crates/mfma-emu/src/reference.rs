//! Single-threaded scalar reference for the 16x16x4 tile multiply-accumulate.
//!
//! C\[m,n\] = C0\[m,n\] + sum_k A\[m,k\] * B\[k,n\]
//!
//! Operands use the per-lane layout of [`crate::layout`]; the dense helpers
//! unpack them into row-major matrices. Summation runs over `k` in ascending
//! order starting from the initial accumulator, the same order the lanes
//! use, so emulation and reference agree bit for bit.

use crate::lane::{LaneId, LANES_PER_SUBGROUP};
use crate::layout::{a_slot, b_slot, c_lane, c_row_col, Floatx4, ACC_WIDTH, TILE_K, TILE_M, TILE_N};

// ────────────────────────────────────────────────────────────────────────────
// Dense layout conversion
// ────────────────────────────────────────────────────────────────────────────

/// Row-major A (16 x 4) from per-lane A scalars.
#[must_use]
pub fn a_matrix(a: &[f32; LANES_PER_SUBGROUP]) -> Vec<f32> {
    let mut out = vec![0.0f32; TILE_M * TILE_K];
    for m in 0..TILE_M {
        for k in 0..TILE_K {
            out[m * TILE_K + k] = a[a_slot(k, m, 0)];
        }
    }
    out
}

/// Row-major B (4 x 16) from per-lane B scalars.
#[must_use]
pub fn b_matrix(b: &[f32; LANES_PER_SUBGROUP]) -> Vec<f32> {
    let mut out = vec![0.0f32; TILE_K * TILE_N];
    for k in 0..TILE_K {
        for n in 0..TILE_N {
            out[k * TILE_N + n] = b[b_slot(k, n)];
        }
    }
    out
}

/// Row-major C (16 x 16) from per-lane accumulators.
#[must_use]
pub fn c_matrix(c: &[Floatx4; LANES_PER_SUBGROUP]) -> Vec<f32> {
    let mut out = vec![0.0f32; TILE_M * TILE_N];
    for lane in LaneId::all() {
        for p in 0..ACC_WIDTH {
            let (row, col) = c_row_col(lane, p);
            out[row * TILE_N + col] = c[lane.index()][p];
        }
    }
    out
}

/// Per-lane accumulators from a row-major C (16 x 16).
///
/// # Panics
/// Panics if `dense.len() != 256`.
#[must_use]
pub fn c_from_matrix(dense: &[f32]) -> [Floatx4; LANES_PER_SUBGROUP] {
    assert_eq!(
        dense.len(),
        TILE_M * TILE_N,
        "C dimension mismatch: expected {} got {}",
        TILE_M * TILE_N,
        dense.len()
    );
    let mut out = [[0.0f32; ACC_WIDTH]; LANES_PER_SUBGROUP];
    for row in 0..TILE_M {
        for col in 0..TILE_N {
            let (lane, p) = c_lane(row, col);
            out[lane][p] = dense[row * TILE_N + col];
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar implementation
// ────────────────────────────────────────────────────────────────────────────

/// Reference result of one `mfma_f32_16x16x4f32` over a whole subgroup.
#[must_use]
pub fn mfma_reference(
    a: &[f32; LANES_PER_SUBGROUP],
    b: &[f32; LANES_PER_SUBGROUP],
    c: &[Floatx4; LANES_PER_SUBGROUP],
) -> [Floatx4; LANES_PER_SUBGROUP] {
    let a = a_matrix(a);
    let b = b_matrix(b);
    let mut out = c_matrix(c);
    for i in 0..TILE_M {
        for j in 0..TILE_N {
            let mut sum = out[i * TILE_N + j];
            for k in 0..TILE_K {
                sum += a[i * TILE_K + k] * b[k * TILE_N + j];
            }
            out[i * TILE_N + j] = sum;
        }
    }
    c_from_matrix(&out)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
