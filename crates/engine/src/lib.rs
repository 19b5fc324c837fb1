// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # engine
//!
//! The capability contract the benchmarking harness expects from the MNN
//! inference engine, expressed as object-safe traits:
//!
//! - [`Engine`]: loads a model file and reports the engine identity.
//! - [`Interpreter`]: a loaded model; registers a kernel cache file and
//!   creates sessions.
//! - [`Session`]: a configured execution context: named input/output
//!   enumeration, tensor resize + session-level resize commit, host
//!   staging writes, synchronous execution with an optional per-operator
//!   [`OpObserver`], and active-backend introspection.
//!
//! Two implementations ship with this crate:
//!
//! - [`StubEngine`]: the degraded mode used when libMNN is not bundled
//!   at build time. Every load attempt reports the fixed guidance text
//!   instead of failing to link.
//! - [`fake::FakeEngine`]: an in-memory engine driven by a JSON model
//!   description. It honors the full contract, including observer
//!   callbacks and device affinities, and backs the CLI's synthetic demo
//!   and the harness integration tests.
//!
//! An FFI-backed bridge to the real libMNN plugs in behind the same
//! traits; it is not part of this workspace because it requires the
//! vendor headers and shared library at link time.

mod backend;
mod contract;
mod error;
pub mod fake;
mod stub;
mod types;

pub use backend::ForwardType;
pub use contract::{Engine, Interpreter, OpObserver, Session};
pub use error::EngineError;
pub use stub::{StubEngine, GUIDANCE, PROFILE_GUIDANCE};
pub use types::{ElementType, OpInfo, ScheduleConfig, TensorDesc, TuningLevel};

/// Engine identity reported in summary lines and used by consumers to
/// detect the runtime revision.
pub const ENGINE_ID: &str = "MNN 3.1.0";

/// Returns the engine compiled into this build.
///
/// Without the FFI bridge this is the [`StubEngine`], whose load path
/// reports the guidance text for supplying libMNN.
pub fn default_engine() -> Box<dyn Engine> {
    Box::new(StubEngine)
}
