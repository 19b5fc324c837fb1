// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error taxonomy for the harness.
//!
//! Every variant is caught at the entry-point boundary in [`crate::api`]
//! and converted into an error-prefixed string; nothing here crosses
//! the public surface as a panic or a `Result`.

use engine::EngineError;

/// Errors that can occur during a run invocation.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The model file is missing or corrupt.
    #[error("{0}")]
    ModelLoad(String),

    /// The engine rejected the schedule configuration.
    #[error("{0}")]
    SessionCreate(String),

    /// Multi-input call with differing name/shape array lengths.
    #[error("names/shapes length mismatch")]
    InputMismatch,

    /// No engine library bundled; the message is the guidance text.
    #[error("{0}")]
    EngineUnavailable(String),

    /// Any other native fault during resize, staging, execution, or
    /// output readback.
    #[error("{0}")]
    EngineFault(String),

    /// Invalid harness configuration (TOML parse, bad values).
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<EngineError> for HarnessError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ModelLoad { .. } => HarnessError::ModelLoad(err.to_string()),
            EngineError::SessionCreate(msg) => HarnessError::SessionCreate(msg),
            EngineError::Unavailable(msg) => HarnessError::EngineUnavailable(msg),
            EngineError::Fault(msg) => HarnessError::EngineFault(msg),
        }
    }
}
