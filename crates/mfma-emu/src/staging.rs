//! Shared staging buffers for cross-lane operand exchange.
//!
//! On hardware every lane can read the `a`/`b` registers of the other lanes
//! participating in the instruction. Here each lane writes its own slot and,
//! after the barrier, reads all of them.
//!
//! # Synchronization invariant
//!
//! There are no per-slot locks and none are needed: slot `i` is written only
//! by lane `i`, and every write happens before the writer arrives at the
//! subgroup barrier. The barrier's mutex hand-off orders all of those writes
//! before every read that follows the release. The atomics below only make
//! the shared access expressible in safe Rust; `Relaxed` is sufficient.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::MfmaError;
use crate::lane::LaneId;

#[derive(Debug)]
struct Slot {
    a: AtomicU32,
    b: AtomicU32,
    /// Lifetime total.
    publishes: AtomicU32,
    /// Publishes since the last audit.
    pending: AtomicU32,
}

impl Slot {
    fn new() -> Self {
        Self {
            a: AtomicU32::new(0),
            b: AtomicU32::new(0),
            publishes: AtomicU32::new(0),
            pending: AtomicU32::new(0),
        }
    }
}

/// Operand A and operand B staging, one slot per lane.
#[derive(Debug)]
pub struct StagingBuffers {
    slots: Vec<Slot>,
}

impl StagingBuffers {
    #[must_use]
    pub fn new(lanes: usize) -> Self {
        Self {
            slots: (0..lanes).map(|_| Slot::new()).collect(),
        }
    }

    #[must_use]
    pub fn lanes(&self) -> usize {
        self.slots.len()
    }

    /// Record the operand scalars passed directly to `lane`.
    ///
    /// Must be called exactly once per cycle, before `lane` arrives at the
    /// barrier.
    ///
    /// # Panics
    /// Panics if `lane` has no slot in this buffer.
    pub fn publish(&self, lane: LaneId, a: f32, b: f32) {
        let slot = &self.slots[lane.index()];
        slot.a.store(a.to_bits(), Ordering::Relaxed);
        slot.b.store(b.to_bits(), Ordering::Relaxed);
        slot.publishes.fetch_add(1, Ordering::Relaxed);
        slot.pending.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn a(&self, slot: usize) -> f32 {
        f32::from_bits(self.slots[slot].a.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn b(&self, slot: usize) -> f32 {
        f32::from_bits(self.slots[slot].b.load(Ordering::Relaxed))
    }

    /// Snapshot of every A slot.
    #[must_use]
    pub fn a_tile(&self) -> Vec<f32> {
        (0..self.lanes()).map(|i| self.a(i)).collect()
    }

    /// Snapshot of every B slot.
    #[must_use]
    pub fn b_tile(&self) -> Vec<f32> {
        (0..self.lanes()).map(|i| self.b(i)).collect()
    }

    /// Total number of publishes into `slot` since construction.
    #[must_use]
    pub fn publish_count(&self, slot: usize) -> u32 {
        self.slots[slot].publishes.load(Ordering::Relaxed)
    }

    /// Check that every slot was published exactly once since the previous
    /// audit, and reset the per-cycle counts.
    ///
    /// Every slot is reset even when one fails, so a stray publish is
    /// reported for the cycle it lands in and not for the ones after it.
    ///
    /// # Errors
    ///
    /// Returns [`MfmaError::PublishMismatch`] for the first slot whose count
    /// differs from one.
    pub fn audit(&self) -> Result<(), MfmaError> {
        let mut first = None;
        for (i, slot) in self.slots.iter().enumerate() {
            let found = slot.pending.swap(0, Ordering::Relaxed);
            if found != 1 && first.is_none() {
                first = Some(MfmaError::PublishMismatch {
                    slot: i,
                    expected: 1,
                    found,
                });
            }
        }
        first.map_or(Ok(()), Err)
    }
}
