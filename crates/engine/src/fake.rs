// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory engine driven by a JSON model description.
//!
//! [`FakeEngine`] honors the complete engine contract without any
//! native dependency: it enforces the resize → commit → stage → run
//! ordering, invokes the operator observer with declared device
//! affinities, and reports a configurable active-backend set. That
//! makes it the vehicle for the harness integration tests and for the
//! CLI's synthetic demo when libMNN is not bundled.
//!
//! A model file is a JSON document:
//!
//! ```json
//! {
//!   "name": "toy",
//!   "inputs":  [{"name": "data", "dims": [1, 3, 8, 8], "dtype": "float"}],
//!   "outputs": [{"name": "prob", "dims": [1, 10], "dtype": "float"}],
//!   "ops": [{"name": "conv1", "type": "Convolution", "device_id": 0}],
//!   "active_backends": [0]
//! }
//! ```
//!
//! `ops` and `active_backends` are optional; an empty active set
//! defaults to the requested primary backend.

use crate::{
    ElementType, Engine, EngineError, Interpreter, OpInfo, OpObserver, ScheduleConfig,
    Session, TensorDesc, ENGINE_ID,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Declarative description of a fake model, (de)serialized as JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelDescription {
    /// Model name (informational).
    pub name: String,
    /// Declared input tensors.
    pub inputs: Vec<TensorDesc>,
    /// Declared output tensors.
    pub outputs: Vec<TensorDesc>,
    /// Operators executed in order during [`Session::run`].
    #[serde(default)]
    pub ops: Vec<OpDescription>,
    /// Backend ids the session reports as active. Empty means "the
    /// requested primary backend".
    #[serde(default)]
    pub active_backends: Vec<i32>,
}

/// One operator of a [`ModelDescription`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OpDescription {
    /// Operator name.
    pub name: String,
    /// Operator type, e.g. `"Convolution"`.
    #[serde(rename = "type")]
    pub op_type: String,
    /// Device id carried by the operator's output tensor; zero means
    /// host memory.
    #[serde(default)]
    pub device_id: u64,
}

impl ModelDescription {
    /// Writes the description to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Fault(format!("serialize model description: {e}")))?;
        std::fs::write(path, text).map_err(|e| EngineError::Fault(format!(
            "write '{}': {e}",
            path.display()
        )))
    }

    /// A small convolution-classifier description used by the CLI demo.
    pub fn demo() -> Self {
        Self {
            name: "demo-classifier".into(),
            inputs: vec![TensorDesc {
                name: "data".into(),
                dims: vec![1, 3, 32, 32],
                dtype: ElementType::Float,
            }],
            outputs: vec![TensorDesc {
                name: "prob".into(),
                dims: vec![1, 10],
                dtype: ElementType::Float,
            }],
            ops: vec![
                OpDescription {
                    name: "conv1".into(),
                    op_type: "Convolution".into(),
                    device_id: 0,
                },
                OpDescription {
                    name: "relu1".into(),
                    op_type: "ReLU".into(),
                    device_id: 0,
                },
                OpDescription {
                    name: "pool1".into(),
                    op_type: "Pooling".into(),
                    device_id: 0,
                },
                OpDescription {
                    name: "fc".into(),
                    op_type: "InnerProduct".into(),
                    device_id: 0,
                },
                OpDescription {
                    name: "softmax".into(),
                    op_type: "Softmax".into(),
                    device_id: 0,
                },
            ],
            active_backends: Vec::new(),
        }
    }
}

/// Engine implementation backed by [`ModelDescription`] files.
#[derive(Debug, Default)]
pub struct FakeEngine;

impl FakeEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for FakeEngine {
    fn runtime_version(&self) -> &str {
        ENGINE_ID
    }

    fn load_model(&self, path: &Path) -> Result<Box<dyn Interpreter>, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::ModelLoad {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        let model: ModelDescription =
            serde_json::from_str(&text).map_err(|e| EngineError::ModelLoad {
                path: path.display().to_string(),
                detail: format!("invalid model description: {e}"),
            })?;
        tracing::debug!(
            "fake engine: loaded '{}' ({} inputs, {} ops)",
            model.name,
            model.inputs.len(),
            model.ops.len(),
        );
        Ok(Box::new(FakeInterpreter {
            model,
            cache_file: None,
        }))
    }
}

/// A loaded fake model.
#[derive(Debug)]
struct FakeInterpreter {
    model: ModelDescription,
    cache_file: Option<PathBuf>,
}

impl Interpreter for FakeInterpreter {
    fn set_cache_file(&mut self, path: &Path) -> Result<(), EngineError> {
        tracing::debug!("fake engine: cache file '{}'", path.display());
        self.cache_file = Some(path.to_path_buf());
        Ok(())
    }

    fn create_session(
        &mut self,
        config: &ScheduleConfig,
    ) -> Result<Box<dyn Session>, EngineError> {
        if self.model.inputs.is_empty() {
            return Err(EngineError::SessionCreate(
                "model declares no inputs".into(),
            ));
        }
        let active = if self.model.active_backends.is_empty() {
            vec![config.forward.raw()]
        } else {
            self.model.active_backends.clone()
        };
        Ok(Box::new(FakeSession {
            model: self.model.clone(),
            threads: config.num_threads.max(1),
            active,
            pending: Vec::new(),
            dims: HashMap::new(),
            staged: HashMap::new(),
            checksum: 0,
        }))
    }
}

/// A live fake session. Drop releases it; the checksum field stands in
/// for device state so runs have observable work.
struct FakeSession {
    model: ModelDescription,
    threads: usize,
    active: Vec<i32>,
    /// Resizes requested but not yet committed.
    pending: Vec<(String, Vec<usize>)>,
    /// Committed per-input dims overriding the declared ones.
    dims: HashMap<String, Vec<usize>>,
    /// Staged input bytes, keyed by input name.
    staged: HashMap<String, Vec<u8>>,
    checksum: u64,
}

impl FakeSession {
    fn input_desc(&self, name: &str) -> Option<TensorDesc> {
        self.model.inputs.iter().find(|t| t.name == name).map(|t| {
            let dims = self.dims.get(name).cloned().unwrap_or_else(|| t.dims.clone());
            TensorDesc {
                name: t.name.clone(),
                dims,
                dtype: t.dtype,
            }
        })
    }
}

impl Session for FakeSession {
    fn inputs(&self) -> Vec<TensorDesc> {
        self.model
            .inputs
            .iter()
            .map(|t| self.input_desc(&t.name).unwrap())
            .collect()
    }

    fn resize_input(&mut self, name: &str, dims: &[usize]) -> Result<bool, EngineError> {
        if self.model.inputs.iter().any(|t| t.name == name) {
            self.pending.push((name.to_string(), dims.to_vec()));
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn commit_resizes(&mut self) -> Result<(), EngineError> {
        for (name, dims) in self.pending.drain(..) {
            if dims.iter().any(|&d| d == 0) {
                return Err(EngineError::Fault(format!(
                    "resize of '{name}' has a zero dimension"
                )));
            }
            self.dims.insert(name, dims);
        }
        Ok(())
    }

    fn write_input(&mut self, name: &str, data: &[u8]) -> Result<(), EngineError> {
        if !self.pending.is_empty() {
            return Err(EngineError::Fault(
                "write_input before commit_resizes".into(),
            ));
        }
        let desc = self
            .input_desc(name)
            .ok_or_else(|| EngineError::Fault(format!("no input named '{name}'")))?;
        if data.len() != desc.size_bytes() {
            return Err(EngineError::Fault(format!(
                "input '{name}' expects {} bytes, got {}",
                desc.size_bytes(),
                data.len(),
            )));
        }
        self.staged.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn run(&mut self, mut observer: Option<&mut dyn OpObserver>) -> Result<(), EngineError> {
        for t in &self.model.inputs {
            if !self.staged.contains_key(&t.name) {
                return Err(EngineError::Fault(format!(
                    "input '{}' was never staged",
                    t.name,
                )));
            }
        }

        let input_sum: u64 = self
            .staged
            .values()
            .flat_map(|b| b.iter())
            .map(|&b| b as u64)
            .sum();

        for (i, op) in self.model.ops.iter().enumerate() {
            let info = OpInfo {
                id: i as u64,
                name: op.name.clone(),
                op_type: op.op_type.clone(),
                output_device_id: op.device_id,
            };
            if let Some(obs) = observer.as_deref_mut() {
                obs.before_op(&info);
            }
            // Stand-in for kernel work so op durations are non-trivial.
            let mut acc = input_sum.wrapping_add(i as u64);
            for round in 0..512u64 {
                acc = acc.wrapping_mul(6364136223846793005).wrapping_add(round);
            }
            self.checksum = self.checksum.wrapping_add(acc);
            if let Some(obs) = observer.as_deref_mut() {
                obs.after_op(&info);
            }
        }
        Ok(())
    }

    fn outputs(&self) -> Vec<TensorDesc> {
        self.model.outputs.clone()
    }

    fn active_backends(&self) -> Vec<i32> {
        self.active.clone()
    }

    fn thread_count(&self) -> usize {
        self.threads
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        tracing::debug!("fake engine: session for '{}' released", self.model.name);
    }
}
