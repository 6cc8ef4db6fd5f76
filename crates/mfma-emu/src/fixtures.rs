//! Deterministic operand tiles for demos and tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MfmaError;
use crate::lane::LANES_PER_SUBGROUP;
use crate::launch::{launch, LaunchReport};
use crate::layout::{Floatx4, ACC_WIDTH};
use crate::subgroup::Subgroup;

/// Per-lane inputs of one instruction: `a[i]`, `b[i]`, `c[i]` go to lane `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileOperands {
    pub a: [f32; LANES_PER_SUBGROUP],
    pub b: [f32; LANES_PER_SUBGROUP],
    pub c: [Floatx4; LANES_PER_SUBGROUP],
}

impl TileOperands {
    /// Launch on `subgroup` and return the resulting accumulators, leaving
    /// `self` untouched.
    ///
    /// # Errors
    ///
    /// See [`launch`].
    pub fn run_on(
        &self,
        subgroup: &mut Subgroup,
    ) -> Result<([Floatx4; LANES_PER_SUBGROUP], LaunchReport), MfmaError> {
        let mut c = self.c;
        let report = launch(subgroup, &self.a, &self.b, &mut c)?;
        Ok((c, report))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fixture {
    /// A\[m,k\] = 1 iff k == m % 4, B\[k,n\] = 1 iff k == n % 4,
    /// c\[i\] = {i, 0, 0, 0}.
    #[default]
    Identity,
    /// Exactly representable ramps: a\[i\] = i/8, b\[i\] = (64 - i)/16,
    /// zero accumulators.
    Ramp,
    Zeros,
}

impl Fixture {
    pub const ALL: [Fixture; 3] = [Fixture::Identity, Fixture::Ramp, Fixture::Zeros];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Ramp => "ramp",
            Self::Zeros => "zeros",
        }
    }

    #[must_use]
    pub fn init(self) -> TileOperands {
        match self {
            Self::Identity => identity_operands(),
            Self::Ramp => TileOperands {
                a: std::array::from_fn(|i| lane_f32(i) / 8.0),
                b: std::array::from_fn(|i| lane_f32(LANES_PER_SUBGROUP - i) / 16.0),
                c: [[0.0; ACC_WIDTH]; LANES_PER_SUBGROUP],
            },
            Self::Zeros => TileOperands {
                a: [0.0; LANES_PER_SUBGROUP],
                b: [0.0; LANES_PER_SUBGROUP],
                c: [[0.0; ACC_WIDTH]; LANES_PER_SUBGROUP],
            },
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fixture {
    type Err = MfmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                MfmaError::InvalidConfig(format!(
                    "unknown fixture '{s}', expected 'identity', 'ramp', or 'zeros'"
                ))
            })
    }
}

#[allow(clippy::cast_precision_loss)]
fn lane_f32(i: usize) -> f32 {
    i as f32
}

fn identity_operands() -> TileOperands {
    let pattern = |i: usize| if i / 16 == i % 4 { 1.0 } else { 0.0 };
    TileOperands {
        a: std::array::from_fn(pattern),
        b: std::array::from_fn(pattern),
        c: std::array::from_fn(|i| [lane_f32(i), 0.0, 0.0, 0.0]),
    }
}
