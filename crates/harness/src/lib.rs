// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # harness
//!
//! Benchmarking harness over the MNN engine contract: it loads a model,
//! configures the execution backend, feeds synthetic input tensors,
//! executes one forward pass, and reports either a compact summary or a
//! per-operator timing profile.
//!
//! The pipeline, per invocation:
//!
//! ```text
//! RunConfig ──► runner::run_once / profile::run_once_profiled
//!     load model → cache file → schedule config → create session
//!     → resize inputs → commit → fill + stage → run → read outputs
//!     → session dropped (released)
//! ```
//!
//! Everything is synchronous and single-owner: one session per
//! invocation, never pooled, with the RNG for synthetic inputs scoped
//! to the invocation. The string-boundary entry points in [`api`]
//! convert every fault into an error-prefixed string and never panic
//! across the public surface.

mod attribution;
mod config;
mod error;
mod fill;
mod profile;
mod report;
mod runner;

pub mod api;

pub use attribution::DeviceAttribution;
pub use config::{FillMode, InputSpec, NamedShape, RunConfig};
pub use error::HarnessError;
pub use fill::{InputFiller, FILL_SEED};
pub use profile::{run_once_profiled, OpTimeline};
pub use report::{
    Metrics, ModelInfo, OperatorRecord, OutputShape, ProfileReport, SummaryReport,
};
pub use runner::{model_info, run_once};
