//! # mfma-emu
//!
//! AMDGPU matrix core instructions, modelled with ordinary CPU threads
//! playing the role of GPU lanes.
//!
//! `mfma_f32_16x16x4f32` computes C\[16x16\] += A\[16x4\] * B\[4x16\] across the
//! 64 lanes of one subgroup. Each lane supplies one scalar of A and B plus
//! four accumulator elements, and needs every other lane's scalars to do its
//! share. This crate reproduces that exchange: per-lane publish into shared
//! staging, a barrier, then the per-lane reduction.
//!
//! ## Modules
//!
//! - [`lane`] — Lane identity, passed explicitly to every call
//! - [`layout`] — Register layout of the instruction (lane → tile coordinates)
//! - [`staging`] — Lock-free shared staging buffers
//! - [`barrier`] — Reusable lane barrier with completion action
//! - [`subgroup`] — The emulated instruction
//! - [`launch`] — One-thread-per-lane kernel launch
//! - [`reference`] — Single-threaded scalar ground truth
//! - [`ulp`] — ULP comparison of accumulator tiles
//! - [`fixtures`] — Deterministic operand tiles
//! - [`format`] — Matrix rendering
//! - [`config`] — YAML launch configuration

// Tile math naturally uses single-character index names (m, n, k, p) and
// lane indices converted to small exact floats.
#![allow(
    clippy::many_single_char_names,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    clippy::doc_markdown
)]

pub mod barrier;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod lane;
pub mod launch;
pub mod layout;
pub mod reference;
pub mod staging;
pub mod subgroup;
pub mod ulp;

pub use error::MfmaError;
pub use lane::{LaneId, LANES_PER_SUBGROUP};
pub use launch::{launch, launch_kernel, LaunchReport};
pub use layout::Floatx4;
pub use subgroup::Subgroup;
