// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the engine contract.

/// Errors an engine implementation can report.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The model file is missing or could not be parsed.
    #[error("failed to load model '{path}': {detail}")]
    ModelLoad { path: String, detail: String },

    /// The engine rejected the schedule configuration.
    #[error("failed to create session: {0}")]
    SessionCreate(String),

    /// No engine library is bundled in this build. The message carries
    /// the guidance text for supplying one; this is a documented
    /// degraded mode, not a fault.
    #[error("{0}")]
    Unavailable(String),

    /// Any other native fault during resize, staging, execution, or
    /// output readback.
    #[error("engine fault: {0}")]
    Fault(String),
}
