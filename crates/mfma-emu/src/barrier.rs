//! Reusable rendezvous for the lanes of one subgroup.
//!
//! Mirrors `std::barrier` with a completion function: the last lane to
//! arrive runs the completion action, then every waiter is released
//! together and the barrier resets for the next cycle. All writes a lane
//! makes before arriving are visible to every lane after release.
//!
//! Arrivals are tracked per lane, so a lane arriving twice in one cycle is
//! reported instead of being counted as somebody else's arrival. There is no
//! timeout: a lane that never arrives blocks the others forever.

use std::fmt;

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::error::MfmaError;
use crate::lane::{LaneId, LANES_PER_SUBGROUP};

/// Action run once per cycle by the last arriving lane, before release.
/// Receives the 1-based number of the cycle being completed.
pub type CompletionFn = Box<dyn Fn(u64) + Send + Sync>;

/// Outcome of one [`LaneBarrier::arrive_and_wait`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierWaitResult {
    /// Cycle that released this lane (1 for the first cycle).
    pub generation: u64,
    /// True for exactly one lane per cycle: the one that ran the completion.
    pub is_leader: bool,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived_mask: u64,
    arrived: usize,
    generation: u64,
}

pub struct LaneBarrier {
    capacity: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
    on_completion: CompletionFn,
}

impl LaneBarrier {
    /// Barrier for `capacity` lanes with a no-op completion.
    ///
    /// # Panics
    /// Panics if `capacity` is zero or exceeds [`LANES_PER_SUBGROUP`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_completion(capacity, Box::new(|_| {}))
    }

    /// # Panics
    /// Panics if `capacity` is zero or exceeds [`LANES_PER_SUBGROUP`].
    #[must_use]
    pub fn with_completion(capacity: usize, on_completion: CompletionFn) -> Self {
        assert!(
            (1..=LANES_PER_SUBGROUP).contains(&capacity),
            "barrier capacity must be in 1..={LANES_PER_SUBGROUP}, got {capacity}"
        );
        Self {
            capacity,
            state: Mutex::new(BarrierState::default()),
            released: Condvar::new(),
            on_completion,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lanes that have arrived in the current, not yet released, cycle.
    #[must_use]
    pub fn arrived(&self) -> usize {
        self.state.lock().arrived
    }

    /// Number of completed cycles.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Arrive as `lane` and block until all `capacity` lanes have arrived.
    ///
    /// # Errors
    ///
    /// Returns [`MfmaError::LaneOutOfRange`] if `lane` is not below the
    /// capacity, or [`MfmaError::DuplicateArrival`] if `lane` already
    /// arrived in the current cycle. A rejected arrival is not counted.
    pub fn arrive_and_wait(&self, lane: LaneId) -> Result<BarrierWaitResult, MfmaError> {
        let index = lane.index();
        if index >= self.capacity {
            return Err(MfmaError::LaneOutOfRange {
                lane: index,
                lanes: self.capacity,
            });
        }
        let bit = 1u64 << index;

        let mut state = self.state.lock();
        let cycle = state.generation + 1;
        if state.arrived_mask & bit != 0 {
            return Err(MfmaError::DuplicateArrival {
                lane: index,
                generation: cycle,
            });
        }
        state.arrived_mask |= bit;
        state.arrived += 1;

        if state.arrived == self.capacity {
            (self.on_completion)(cycle);
            state.arrived_mask = 0;
            state.arrived = 0;
            state.generation = cycle;
            self.released.notify_all();
            trace!(%lane, cycle, "barrier released");
            return Ok(BarrierWaitResult {
                generation: cycle,
                is_leader: true,
            });
        }

        while state.generation < cycle {
            self.released.wait(&mut state);
        }
        Ok(BarrierWaitResult {
            generation: cycle,
            is_leader: false,
        })
    }
}

impl fmt::Debug for LaneBarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LaneBarrier")
            .field("capacity", &self.capacity)
            .field("arrived", &state.arrived)
            .field("generation", &state.generation)
            .finish_non_exhaustive()
    }
}
