// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Execution-target identifiers and the user-facing name resolver.
//!
//! Backend selection arrives as a free-form string from the caller
//! ("CPU", "VULKAN", ...). [`ForwardType::resolve`] maps it onto the
//! engine's fixed numeric identifiers; [`ForwardType::label`] is the
//! exact inverse for canonical names. Both are total: unrecognized
//! names fall back to CPU (historical behavior the harness preserves)
//! and unknown raw ids format as `"UNKNOWN"`.

use std::fmt;

/// A hardware execution target understood by the engine.
///
/// The discriminants are part of the engine ABI: session introspection
/// reports active backends as these raw integers, and per-operator
/// device affinities are interpreted against them.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ForwardType {
    /// Host CPU execution.
    Cpu = 0,
    /// Apple Metal GPU backend.
    Metal = 1,
    /// NVIDIA CUDA backend.
    Cuda = 2,
    /// OpenCL GPU backend.
    OpenCl = 3,
    /// Engine-chosen backend.
    Auto = 4,
    /// Android NNAPI accelerator delegate.
    Nn = 5,
    /// OpenGL ES compute backend.
    OpenGl = 6,
    /// Vulkan compute backend.
    Vulkan = 7,
    /// All backends (reporting only; never requested directly).
    All = 8,
}

impl ForwardType {
    /// Resolves a user-facing backend name to an execution target.
    ///
    /// Unrecognized or empty names resolve to [`ForwardType::Cpu`].
    /// This silent fallback is deliberate and must be preserved: callers
    /// have historically relied on misspelled backends running on CPU
    /// rather than erroring.
    pub fn resolve(name: &str) -> Self {
        match name {
            "AUTO" => ForwardType::Auto,
            "CPU" => ForwardType::Cpu,
            "VULKAN" => ForwardType::Vulkan,
            "OPENCL" => ForwardType::OpenCl,
            "OPENGL" | "OPENGL_ES" | "OPENGL_ES3" => ForwardType::OpenGl,
            "METAL" => ForwardType::Metal,
            "CUDA" => ForwardType::Cuda,
            "NN" | "NNAPI" => ForwardType::Nn,
            _ => ForwardType::Cpu,
        }
    }

    /// Returns the canonical name for this target.
    pub fn label(self) -> &'static str {
        match self {
            ForwardType::Cpu => "CPU",
            ForwardType::Auto => "AUTO",
            ForwardType::Metal => "METAL",
            ForwardType::Cuda => "CUDA",
            ForwardType::OpenCl => "OPENCL",
            ForwardType::OpenGl => "OPENGL",
            ForwardType::Vulkan => "VULKAN",
            ForwardType::Nn => "NN",
            ForwardType::All => "ALL",
        }
    }

    /// Converts a raw engine id back into a target, or `None` for ids
    /// this revision does not know about.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ForwardType::Cpu),
            1 => Some(ForwardType::Metal),
            2 => Some(ForwardType::Cuda),
            3 => Some(ForwardType::OpenCl),
            4 => Some(ForwardType::Auto),
            5 => Some(ForwardType::Nn),
            6 => Some(ForwardType::OpenGl),
            7 => Some(ForwardType::Vulkan),
            8 => Some(ForwardType::All),
            _ => None,
        }
    }

    /// Returns the raw engine id.
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Formats a raw engine id, using `"UNKNOWN"` for ids outside the
    /// known set.
    pub fn label_of_raw(raw: i32) -> &'static str {
        Self::from_raw(raw).map_or("UNKNOWN", Self::label)
    }

    /// Returns `true` for device-memory ("GPU-class") targets, including
    /// the NNAPI accelerator delegate.
    ///
    /// Used by backend attribution: an operator whose output tensor
    /// carries a non-zero device id executed on one of these.
    pub fn is_gpu_class(self) -> bool {
        matches!(
            self,
            ForwardType::OpenCl
                | ForwardType::OpenGl
                | ForwardType::Vulkan
                | ForwardType::Cuda
                | ForwardType::Metal
                | ForwardType::Nn
        )
    }
}

impl fmt::Display for ForwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
