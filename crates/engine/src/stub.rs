// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Degraded-mode engine used when libMNN is not bundled.
//!
//! Builds without the vendor library must still produce a working
//! binary whose entry points return a descriptive string rather than
//! failing to link or run. [`StubEngine`] fails every model load with
//! [`EngineError::Unavailable`] carrying the fixed guidance text, which
//! the harness boundary passes through verbatim.

use crate::{Engine, EngineError, Interpreter, ENGINE_ID};
use std::path::Path;

/// Guidance text returned by every entry point when the engine library
/// is missing. Consumers match on this string; keep it stable.
pub const GUIDANCE: &str = "MNN not bundled. Place the MNN headers under \
third_party/MNN/include and libMNN.so on the linker search path, then \
rebuild with the MNN bridge.";

/// Guidance variant for the profiling entry points.
pub const PROFILE_GUIDANCE: &str =
    "MNN not bundled. Cannot profile. Place headers and libMNN.so as documented.";

/// The engine placeholder compiled in when no real bridge is available.
#[derive(Debug, Default)]
pub struct StubEngine;

impl Engine for StubEngine {
    fn runtime_version(&self) -> &str {
        ENGINE_ID
    }

    fn load_model(&self, path: &Path) -> Result<Box<dyn Interpreter>, EngineError> {
        tracing::warn!("engine unavailable; cannot load '{}'", path.display());
        Err(EngineError::Unavailable(GUIDANCE.to_string()))
    }
}
