//! Text rendering of operand and result tiles in matrix orientation.
//!
//! Each matrix is printed under a `label:` line, one row per line, every
//! value right-aligned in four columns and followed by a space, with a blank
//! line at the end. Values use the shortest of fixed or exponent notation
//! at six significant digits, like C's `%4g`.

use std::fmt::Write;

use crate::lane::{LaneId, LANES_PER_SUBGROUP};
use crate::layout::{a_slot, b_slot, c_lane, Floatx4, TileCoord, ACC_WIDTH, TILE_K, TILE_M, TILE_N};

/// Significant digits of a rendered value.
const SIGNIFICANT: u8 = 6;

/// Render `value` with [`SIGNIFICANT`] digits, trailing zeros dropped, in
/// exponent form when the decimal exponent is below -4 or at least
/// [`SIGNIFICANT`].
fn general(value: f32) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to SIGNIFICANT digits may carry into the exponent.
    let scientific = format!("{:.*e}", usize::from(SIGNIFICANT - 1), value);
    let (mantissa, exp) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= i32::from(SIGNIFICANT) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.unsigned_abs())
    } else {
        let decimals = usize::try_from(i32::from(SIGNIFICANT) - 1 - exp).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

fn push_cell(out: &mut String, value: f32) {
    // Writing to a String cannot fail.
    let _ = write!(out, "{:>4} ", general(value));
}

/// A as 16 rows by 4 columns.
#[must_use]
pub fn format_a_matrix(label: &str, a: &[f32; LANES_PER_SUBGROUP]) -> String {
    let mut out = format!("{label}:\n");
    for m in 0..TILE_M {
        for k in 0..TILE_K {
            push_cell(&mut out, a[a_slot(k, m, 0)]);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// B as 4 rows by 16 columns.
#[must_use]
pub fn format_b_matrix(label: &str, b: &[f32; LANES_PER_SUBGROUP]) -> String {
    let mut out = format!("{label}:\n");
    for k in 0..TILE_K {
        for n in 0..TILE_N {
            push_cell(&mut out, b[b_slot(k, n)]);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// C as 16 rows by 16 columns, gathered from the per-lane accumulators.
#[must_use]
pub fn format_c_matrix(label: &str, c: &[Floatx4; LANES_PER_SUBGROUP]) -> String {
    let mut out = format!("{label}:\n");
    for row in 0..TILE_M {
        for col in 0..TILE_N {
            let (lane, p) = c_lane(row, col);
            push_cell(&mut out, c[lane][p]);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Which tile coordinates and staging slots each lane touches.
#[must_use]
pub fn format_lane_layout() -> String {
    let mut out = String::from("lane   m   n  a slots (k=0..3, p=0)  b slots (k=0..3)\n");
    for lane in LaneId::all() {
        let TileCoord { m, n } = TileCoord::for_lane(lane);
        let a: Vec<String> = (0..TILE_K).map(|k| a_slot(k, m, 0).to_string()).collect();
        let b: Vec<String> = (0..TILE_K).map(|k| b_slot(k, n).to_string()).collect();
        let _ = writeln!(
            out,
            "{:>4} {m:>3} {n:>3}  {:<22} {}",
            lane.index(),
            a.join(","),
            b.join(","),
        );
    }
    let _ = writeln!(
        out,
        "\neach lane accumulates rows m..m+{ACC_WIDTH} of column n"
    );
    out
}
