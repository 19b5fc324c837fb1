// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Backend attribution: which concrete backend executed an operator.
//!
//! The engine may silently fall operators back to CPU even when a GPU
//! backend was requested (unsupported ops, driver limits). The global
//! requested backend is therefore not ground truth; the per-operator
//! device id on the output tensor is. This module isolates the
//! heuristic that turns (requested backend, session-reported active
//! set, device id) into a display label, so it can be unit-tested and
//! swapped independently of the execution path. The inference rules
//! are engine-version-dependent.

use engine::ForwardType;

/// Precomputed labeling strategy for one profiled run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceAttribution {
    device_label: &'static str,
}

impl DeviceAttribution {
    /// Builds the strategy from the requested backend and the session's
    /// reported active-backend set (raw engine ids).
    ///
    /// - Requested AUTO or CPU: the first GPU-class id in the active
    ///   set labels device-bound operators; with none present,
    ///   everything is CPU.
    /// - Requested GPU-class backend: its own label is used directly.
    /// - Anything else: CPU.
    pub fn new(requested: ForwardType, active_backends: &[i32]) -> Self {
        let device_label = match requested {
            ForwardType::Auto | ForwardType::Cpu => active_backends
                .iter()
                .filter_map(|&raw| ForwardType::from_raw(raw))
                .find(|t| t.is_gpu_class())
                .map_or("CPU", ForwardType::label),
            gpu if gpu.is_gpu_class() => gpu.label(),
            _ => "CPU",
        };
        Self { device_label }
    }

    /// The label applied to operators with a non-zero device id.
    pub fn device_label(&self) -> &'static str {
        self.device_label
    }

    /// Labels one operator given its output tensor's device id. A zero
    /// or absent id always means host memory, hence CPU.
    pub fn label_for(&self, device_id: u64) -> &'static str {
        if device_id == 0 {
            "CPU"
        } else {
            self.device_label
        }
    }
}
