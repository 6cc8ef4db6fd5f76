//! ULP (unit in the last place) comparison of accumulator tiles.
//!
//! Emulated results are checked against [`crate::reference`]; since both
//! sum in the same order the expected tolerance is 0 ULP.

use crate::error::MfmaError;
use crate::layout::Floatx4;

/// Position of `x` on a line where neighbouring floats are one apart and
/// both zeros sit at 0.
fn ordinal(x: f32) -> i64 {
    let bits = x.to_bits();
    let magnitude = i64::from(bits & 0x7fff_ffff);
    if x.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Number of representable `f32` steps from `a` to `b`.
///
/// Counts through zero when the signs differ; `0.0` and `-0.0` are 0 apart.
/// NaN on either side yields `u32::MAX`.
#[must_use]
pub fn ulp_distance(a: f32, b: f32) -> u32 {
    if a.is_nan() || b.is_nan() {
        return u32::MAX;
    }
    u32::try_from(ordinal(a).abs_diff(ordinal(b))).unwrap_or(u32::MAX)
}

/// Compare per-lane accumulators within `max_ulp`.
///
/// # Errors
///
/// Returns [`MfmaError::Mismatch`] for the first lane/element out of
/// tolerance.
pub fn compare_accumulators(
    got: &[Floatx4],
    expected: &[Floatx4],
    max_ulp: u32,
) -> Result<(), MfmaError> {
    for (lane, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
        for (element, (&gv, &ev)) in g.iter().zip(e.iter()).enumerate() {
            if ulp_distance(gv, ev) > max_ulp {
                return Err(MfmaError::Mismatch {
                    lane,
                    element,
                    got: gv,
                    expected: ev,
                });
            }
        }
    }
    Ok(())
}

/// Bit-for-bit equality, distinguishing `-0.0` from `0.0` and comparing NaN
/// payloads.
#[must_use]
pub fn bitwise_eq(a: &[Floatx4], b: &[Floatx4]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| x.to_bits() == y.to_bits())
}
