//! Kernel launch: one OS thread per lane, like `kernel<<<1, 64>>>`.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::MfmaError;
use crate::lane::{LaneId, LANES_PER_SUBGROUP};
use crate::layout::Floatx4;
use crate::subgroup::Subgroup;

/// Summary of one completed launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    /// Subgroup cycle this launch completed.
    pub generation: u64,
    pub lanes: usize,
    pub elapsed: Duration,
}

/// Run `c[i] = mfma(a[i], b[i], c[i])` on every lane of `subgroup`.
///
/// Spawns exactly one thread per lane and returns once all of them have
/// joined. `c` is written only if every lane succeeded, so callers never
/// observe a partially updated accumulator tile.
///
/// The subgroup is borrowed mutably for the whole launch: two launches on
/// one subgroup would interleave their lanes at the barrier.
///
/// ```compile_fail
/// use mfma_emu::{launch, Subgroup};
///
/// let mut subgroup = Subgroup::new();
/// let (a, b) = ([0.0; 64], [0.0; 64]);
/// let (mut c1, mut c2) = ([[0.0; 4]; 64], [[0.0; 4]; 64]);
/// std::thread::scope(|s| {
///     s.spawn(|| launch(&mut subgroup, &a, &b, &mut c1));
///     s.spawn(|| launch(&mut subgroup, &a, &b, &mut c2));
/// });
/// ```
///
/// A lane that panics before reaching the barrier leaves the others
/// blocked forever; the harness does not guard against that.
///
/// # Errors
///
/// Returns the first lane error in lane order, [`MfmaError::LanePanicked`]
/// for a lane that panicked, or the staging audit violation recorded for
/// this launch.
pub fn launch(
    subgroup: &mut Subgroup,
    a: &[f32; LANES_PER_SUBGROUP],
    b: &[f32; LANES_PER_SUBGROUP],
    c: &mut [Floatx4; LANES_PER_SUBGROUP],
) -> Result<LaunchReport, MfmaError> {
    launch_lanes(subgroup, a, b, c, Subgroup::mfma_f32_16x16x4f32)
}

/// Per-lane body of a launch.
type LaneKernel = fn(&Subgroup, LaneId, f32, f32, Floatx4) -> Result<Floatx4, MfmaError>;

fn launch_lanes(
    subgroup: &mut Subgroup,
    a: &[f32; LANES_PER_SUBGROUP],
    b: &[f32; LANES_PER_SUBGROUP],
    c: &mut [Floatx4; LANES_PER_SUBGROUP],
    kernel: LaneKernel,
) -> Result<LaunchReport, MfmaError> {
    let start = Instant::now();
    let input = *c;
    let subgroup: &Subgroup = subgroup;

    let joined: Vec<Result<Floatx4, MfmaError>> = thread::scope(|s| {
        let handles: Vec<_> = LaneId::all()
            .map(|lane| {
                let i = lane.index();
                let (ai, bi, ci) = (a[i], b[i], input[i]);
                let handle = s.spawn(move || kernel(subgroup, lane, ai, bi, ci));
                (lane, handle)
            })
            .collect();
        handles
            .into_iter()
            .map(|(lane, handle)| {
                handle
                    .join()
                    .map_err(|_| MfmaError::LanePanicked { lane: lane.index() })
                    .and_then(|result| result)
            })
            .collect()
    });

    let mut output = input;
    for (slot, result) in output.iter_mut().zip(joined) {
        *slot = result?;
    }
    if let Some(violation) = subgroup.take_violations().into_iter().next() {
        return Err(violation);
    }
    *c = output;

    let report = LaunchReport {
        generation: subgroup.cycles(),
        lanes: LANES_PER_SUBGROUP,
        elapsed: start.elapsed(),
    };
    debug!(
        generation = report.generation,
        lanes = report.lanes,
        elapsed_us = report.elapsed.as_micros(),
        "launch complete"
    );
    Ok(report)
}

/// [`launch`] on a fresh subgroup.
///
/// # Errors
///
/// See [`launch`].
pub fn launch_kernel(
    a: &[f32; LANES_PER_SUBGROUP],
    b: &[f32; LANES_PER_SUBGROUP],
    c: &mut [Floatx4; LANES_PER_SUBGROUP],
) -> Result<LaunchReport, MfmaError> {
    launch(&mut Subgroup::new(), a, b, c)
}
