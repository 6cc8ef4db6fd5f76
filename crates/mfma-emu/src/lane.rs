//! Lane identity.
//!
//! A GPU kernel receives its `threadIdx` implicitly. Here every lane carries
//! an explicit [`LaneId`] that is handed to each call instead of living in
//! thread-local state, so the routines stay pure and testable.

use std::fmt;

use crate::error::MfmaError;

/// Number of lanes in one subgroup (wavefront) of the emulated instruction.
pub const LANES_PER_SUBGROUP: usize = 64;

/// Identity of one lane within a subgroup, always in `0..LANES_PER_SUBGROUP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneId(usize);

impl LaneId {
    /// Create a lane identity.
    ///
    /// # Errors
    ///
    /// Returns [`MfmaError::LaneOutOfRange`] if `index >= LANES_PER_SUBGROUP`.
    /// Larger subgroups are not supported.
    pub fn new(index: usize) -> Result<Self, MfmaError> {
        if index < LANES_PER_SUBGROUP {
            Ok(Self(index))
        } else {
            Err(MfmaError::LaneOutOfRange {
                lane: index,
                lanes: LANES_PER_SUBGROUP,
            })
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// All lanes of one subgroup, in ascending order.
    pub fn all() -> impl Iterator<Item = LaneId> {
        (0..LANES_PER_SUBGROUP).map(LaneId)
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane#{}", self.0)
    }
}
