// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Object-safe traits describing what the harness needs from an
//! inference engine.
//!
//! The lifecycle is strictly ordered:
//!
//! ```text
//! Engine::load_model
//!     │
//!     ▼
//! Interpreter ── set_cache_file (optional)
//!     │
//!     ▼  create_session(ScheduleConfig)
//! Session ── resize_input* → commit_resizes → write_input* → run
//!     │
//!     ▼  drop
//! engine resources released
//! ```
//!
//! A [`Session`] is a single-owner resource: dropping it releases the
//! underlying engine state on every exit path, success or failure.

use crate::{EngineError, OpInfo, ScheduleConfig, TensorDesc};
use std::path::Path;

/// Entry point into an engine build: loads models and identifies the
/// runtime revision.
pub trait Engine {
    /// Engine identity string, e.g. `"MNN 3.1.0"`.
    fn runtime_version(&self) -> &str;

    /// Loads a model from a file path.
    ///
    /// A missing or corrupt file is fatal and reported via
    /// [`EngineError::ModelLoad`]; the harness never retries.
    fn load_model(&self, path: &Path) -> Result<Box<dyn Interpreter>, EngineError>;
}

/// A loaded model, ready to produce sessions.
pub trait Interpreter {
    /// Registers a cache file some backends use to persist compiled
    /// kernels across runs. Callers skip this entirely for an absent
    /// or empty path.
    fn set_cache_file(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Creates a session bound to the given schedule configuration.
    fn create_session(
        &mut self,
        config: &ScheduleConfig,
    ) -> Result<Box<dyn Session>, EngineError>;
}

/// A configured, resource-holding execution context.
///
/// Implementations release engine resources in `Drop`.
pub trait Session {
    /// Enumerates the session's input tensors with their current shapes.
    fn inputs(&self) -> Vec<TensorDesc>;

    /// Requests a resize of the named input. Returns `Ok(false)` when
    /// the model declares no input of that name; the request is then a
    /// no-op rather than an error (historical behavior).
    ///
    /// Resizes take effect only after [`Session::commit_resizes`].
    fn resize_input(&mut self, name: &str, dims: &[usize]) -> Result<bool, EngineError>;

    /// Commits every pending resize atomically at the session level.
    fn commit_resizes(&mut self) -> Result<(), EngineError>;

    /// Copies fully-initialized host staging data into the named
    /// device-resident input tensor. `data` must match the tensor's
    /// post-commit byte size exactly.
    fn write_input(&mut self, name: &str, data: &[u8]) -> Result<(), EngineError>;

    /// Executes one synchronous forward pass.
    ///
    /// When an observer is supplied and the engine build supports
    /// instrumentation, the engine invokes
    /// [`OpObserver::before_op`] / [`OpObserver::after_op`] around each
    /// operator. Engines without instrumentation ignore the observer;
    /// callers must treat an empty operator timeline as valid.
    fn run(&mut self, observer: Option<&mut dyn OpObserver>) -> Result<(), EngineError>;

    /// Enumerates the session's output tensors with their result shapes.
    fn outputs(&self) -> Vec<TensorDesc>;

    /// Raw ids of the backends the engine actually scheduled onto.
    ///
    /// The set may include backends other than the requested one: the
    /// engine silently falls operators back to CPU when a backend does
    /// not support them.
    fn active_backends(&self) -> Vec<i32>;

    /// Worker thread count in effect, after any engine-side clamping.
    fn thread_count(&self) -> usize;
}

/// Accumulator for per-operator execution callbacks.
///
/// The engine calls `before_op` immediately before and `after_op`
/// immediately after each operator, with the same [`OpInfo::id`] on
/// both calls. The observer owns all recording state explicitly; no
/// hidden captures.
pub trait OpObserver {
    fn before_op(&mut self, op: &OpInfo);
    fn after_op(&mut self, op: &OpInfo);
}
