// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Value types shared across the engine contract: tensor descriptors,
//! operator metadata, and the schedule configuration that determines
//! how and where a session executes.

use crate::ForwardType;

/// Element type of a tensor, as coarse as the engine reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 32-bit IEEE 754 floating point.
    Float,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Anything the engine does not classify.
    Unknown,
}

impl ElementType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            ElementType::Float | ElementType::Int | ElementType::Uint => 4,
            ElementType::Unknown => 1,
        }
    }

    /// Returns the label used in model-info reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Float => "float",
            ElementType::Int => "int",
            ElementType::Uint => "uint",
            ElementType::Unknown => "unknown",
        }
    }
}

/// Describes one named input or output tensor of a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TensorDesc {
    /// Tensor name as declared by the model.
    pub name: String,
    /// Current dimensions, outermost first.
    pub dims: Vec<usize>,
    /// Element type.
    pub dtype: ElementType,
}

impl TensorDesc {
    /// Total number of elements. A rank-0 tensor holds one element.
    pub fn element_count(&self) -> usize {
        if self.dims.is_empty() {
            1
        } else {
            self.dims.iter().product()
        }
    }

    /// Host-side staging size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.element_count() * self.dtype.size_bytes()
    }
}

/// Metadata the engine hands to an [`crate::OpObserver`] around each
/// operator's execution.
#[derive(Debug, Clone)]
pub struct OpInfo {
    /// Stable operator identity within one run. The same `id` is passed
    /// to the before- and after-callbacks of one operator.
    pub id: u64,
    /// Operator name from the model graph.
    pub name: String,
    /// Operator type, e.g. `"Convolution"`.
    pub op_type: String,
    /// Device id of the operator's first output tensor. Zero means the
    /// output lives in host memory.
    pub output_device_id: u64,
}

/// A LOW / NORMAL / HIGH tuning knob.
///
/// The engine exposes precision, memory, and power as three knobs with
/// identical levels; the harness parses each from its own user-facing
/// string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TuningLevel {
    Low,
    #[default]
    Normal,
    High,
}

impl TuningLevel {
    /// Parses a user-facing level name. Anything other than `"LOW"` or
    /// `"HIGH"` (including empty) is `Normal`, matching the engine's
    /// default.
    pub fn parse(name: &str) -> Self {
        match name {
            "LOW" => TuningLevel::Low,
            "HIGH" => TuningLevel::High,
            _ => TuningLevel::Normal,
        }
    }
}

/// The schedule configuration a session is created from.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Primary execution target.
    pub forward: ForwardType,
    /// Fallback target for operators the primary backend cannot run.
    pub backup: ForwardType,
    /// Worker thread count; the engine may clamp it.
    pub num_threads: usize,
    /// Compute precision level.
    pub precision: TuningLevel,
    /// Memory-use aggressiveness.
    pub memory: TuningLevel,
    /// Power/performance preference.
    pub power: TuningLevel,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            forward: ForwardType::Cpu,
            backup: ForwardType::Cpu,
            num_threads: 1,
            precision: TuningLevel::Normal,
            memory: TuningLevel::Normal,
            power: TuningLevel::Normal,
        }
    }
}
