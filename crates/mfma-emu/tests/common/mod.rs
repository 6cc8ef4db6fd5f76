//! Shared helpers for the subgroup falsification tests.

use mfma_emu::{Floatx4, LANES_PER_SUBGROUP};

/// Accumulators of the identity fixture after one instruction, derived
/// element by element from C[m,n] += sum_k A[m,k] * B[k,n] with
/// A[m,k] = [k == m % 4], B[k,n] = [k == n % 4] and c[i] = {i, 0, 0, 0}.
///
/// Lane `i` element `p` holds C[4(i/16) + p, i % 16], so the sum is 1 exactly
/// when `p == (i % 16) % 4`.
pub fn identity_expected() -> [Floatx4; LANES_PER_SUBGROUP] {
    std::array::from_fn(|i| {
        std::array::from_fn(|p| {
            let initial = if p == 0 { i as f32 } else { 0.0 };
            let product = if p == i % 4 { 1.0 } else { 0.0 };
            initial + product
        })
    })
}

/// Pseudo-random but reproducible operands in [-scale, scale).
pub fn scrambled(seed: u32, scale: f32) -> [f32; LANES_PER_SUBGROUP] {
    std::array::from_fn(|i| {
        let x = (i as u32).wrapping_mul(2_654_435_761).wrapping_add(seed.wrapping_mul(40_503));
        let unit = (x >> 8) as f32 / (1u32 << 24) as f32;
        (unit * 2.0 - 1.0) * scale
    })
}

/// Accumulators built from a flat slice of 256 values.
pub fn accumulators_from(values: &[f32]) -> [Floatx4; LANES_PER_SUBGROUP] {
    assert_eq!(values.len(), LANES_PER_SUBGROUP * 4);
    std::array::from_fn(|i| std::array::from_fn(|p| values[i * 4 + p]))
}
