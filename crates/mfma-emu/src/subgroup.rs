//! The emulated `mfma_f32_16x16x4f32` instruction.
//!
//! C\[16x16\] += A\[16x4\] * B\[4x16\], spread over the 64 lanes of one
//! subgroup. Each lane passes in one scalar of A, one scalar of B and its
//! four accumulator elements; the instruction needs every other lane's
//! scalars too, so lanes publish to shared staging, meet at a barrier, and
//! only then reduce.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::barrier::LaneBarrier;
use crate::error::MfmaError;
use crate::lane::{LaneId, LANES_PER_SUBGROUP};
use crate::layout::{a_slot, b_slot, Floatx4, TileCoord, ACC_WIDTH, TILE_K};
use crate::staging::StagingBuffers;

/// One subgroup: staging buffers plus the barrier that guards them.
///
/// Independent subgroups share nothing and may run concurrently. Within one
/// subgroup, consecutive instructions must be separated by joining every
/// lane; a lane must never publish for the next instruction while another
/// lane may still be reducing. [`crate::launch::launch`] takes the subgroup by
/// `&mut` so two launches can never overlap on it.
#[derive(Debug)]
pub struct Subgroup {
    staging: Arc<StagingBuffers>,
    barrier: LaneBarrier,
    violations: Arc<Mutex<Vec<MfmaError>>>,
    /// Bit `i` is set while lane `i` is inside the instruction.
    in_flight: AtomicU64,
}

impl Subgroup {
    #[must_use]
    pub fn new() -> Self {
        let staging = Arc::new(StagingBuffers::new(LANES_PER_SUBGROUP));
        let violations = Arc::new(Mutex::new(Vec::new()));

        // Runs while every lane is parked at the barrier: each slot must have
        // been published exactly once since the previous cycle.
        let audited = Arc::clone(&staging);
        let sink = Arc::clone(&violations);
        let barrier = LaneBarrier::with_completion(
            LANES_PER_SUBGROUP,
            Box::new(move |cycle| {
                if let Err(e) = audited.audit() {
                    warn!(cycle, error = %e, "staging audit failed");
                    sink.lock().push(e);
                }
            }),
        );

        Self {
            staging,
            barrier,
            violations,
            in_flight: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn lanes(&self) -> usize {
        self.barrier.capacity()
    }

    /// Completed instruction cycles.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.barrier.generation()
    }

    #[must_use]
    pub fn staging(&self) -> &StagingBuffers {
        &self.staging
    }

    /// Drain the staging-audit violations recorded so far.
    pub fn take_violations(&self) -> Vec<MfmaError> {
        std::mem::take(&mut *self.violations.lock())
    }

    /// Execute the instruction as `lane`.
    ///
    /// Functionally equivalent to AMDGPU `__builtin_amdgcn_mfma_f32_16x16x4f32`
    /// when called once by each of the 64 lanes. Blocks until all of them
    /// have called it.
    ///
    /// # Errors
    ///
    /// Returns [`MfmaError::DuplicateArrival`] if `lane` is already inside
    /// the instruction. The rejected call publishes nothing, so the staged
    /// operands of the first call are left intact.
    ///
    /// # Panics
    /// Panics if `lane` does not belong to this subgroup.
    pub fn mfma_f32_16x16x4f32(
        &self,
        lane: LaneId,
        a: f32,
        b: f32,
        mut c: Floatx4,
    ) -> Result<Floatx4, MfmaError> {
        assert!(
            lane.index() < self.lanes(),
            "{lane} outside subgroup: only one subgroup of {} lanes is supported",
            self.lanes()
        );

        let bit = 1u64 << lane.index();
        if self.in_flight.fetch_or(bit, Ordering::AcqRel) & bit != 0 {
            return Err(MfmaError::DuplicateArrival {
                lane: lane.index(),
                generation: self.cycles() + 1,
            });
        }

        self.staging.publish(lane, a, b);
        trace!(%lane, a, b, "published");
        let released = self.barrier.arrive_and_wait(lane).map(|_| {
            let TileCoord { m, n } = TileCoord::for_lane(lane);
            for k in 0..TILE_K {
                let b_kn = self.staging.b(b_slot(k, n));
                for p in 0..ACC_WIDTH {
                    c[p] += self.staging.a(a_slot(k, m, p)) * b_kn;
                }
            }
            c
        });
        self.in_flight.fetch_and(!bit, Ordering::AcqRel);
        released
    }
}

impl Default for Subgroup {
    fn default() -> Self {
        Self::new()
    }
}
