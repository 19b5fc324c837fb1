// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Run configuration, constructed programmatically or loaded from TOML.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/mobilenet.mnn"
//! inputs = [1, 3, 224, 224]            # or [{ name = "data", dims = [1, 3, 224, 224] }]
//! backend = "VULKAN"
//! backup = "CPU"
//! precision = "LOW"
//! fill = "UNIFORM"
//! threads = 4
//! cache_file = "./kernel.cache"
//! ```

use engine::{ForwardType, ScheduleConfig, TuningLevel};
use std::path::{Path, PathBuf};

/// Synthetic-data generation strategy for input tensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillMode {
    /// All-zero bytes.
    #[default]
    Zero,
    /// 1.0 in every element (floating-point tensors only).
    One,
    /// Uniform draws over `[0, 1)` (floating-point tensors only).
    Uniform,
    /// Standard normal draws (floating-point tensors only).
    Normal,
}

impl FillMode {
    /// Parses a user-facing fill-mode name. Unrecognized names fall
    /// back to [`FillMode::Zero`], matching historical behavior.
    pub fn parse(name: &str) -> Self {
        match name {
            "ONE" => FillMode::One,
            "UNIFORM" => FillMode::Uniform,
            "NORMAL" => FillMode::Normal,
            _ => FillMode::Zero,
        }
    }
}

/// One named input shape of a multi-input run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NamedShape {
    /// Input tensor name.
    pub name: String,
    /// Target dimensions, outermost first.
    pub dims: Vec<usize>,
}

/// The input-shape declaration of a run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum InputSpec {
    /// A single shape applied to every input tensor.
    ///
    /// This assumes all inputs share one shape, a known simplification
    /// inherited from the original harness, preserved deliberately.
    /// Models with differently-shaped inputs need [`InputSpec::Named`].
    Broadcast(Vec<usize>),
    /// Per-input shapes, keyed by tensor name.
    Named(Vec<NamedShape>),
}

/// Immutable configuration for one run invocation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    /// Path to the model file.
    pub model_path: PathBuf,
    /// Input shape declaration.
    pub inputs: InputSpec,
    /// Requested backend name, kept verbatim: summary lines echo it as
    /// given, while resolution to an execution target is total (unknown
    /// names run on CPU).
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Fallback backend name; empty resolves to CPU.
    #[serde(default)]
    pub backup: String,
    /// Compute precision level.
    #[serde(default)]
    pub precision: TuningLevel,
    /// Memory-use aggressiveness.
    #[serde(default)]
    pub memory: TuningLevel,
    /// Power/performance preference.
    #[serde(default)]
    pub power: TuningLevel,
    /// Synthetic fill mode for input tensors.
    #[serde(default)]
    pub fill: FillMode,
    /// Requested worker threads; values below 1 are clamped to 1.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Optional kernel cache file. `None` or an empty path is a no-op.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,
}

fn default_backend() -> String {
    "CPU".to_string()
}

fn default_threads() -> usize {
    1
}

impl RunConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::HarnessError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, super::HarnessError> {
        toml::from_str(content)
            .map_err(|e| super::HarnessError::Config(format!("invalid config: {e}")))
    }

    /// Translates the user-facing selections into the engine's schedule
    /// configuration.
    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            forward: ForwardType::resolve(&self.backend),
            backup: ForwardType::resolve(&self.backup),
            num_threads: self.threads.max(1),
            precision: self.precision,
            memory: self.memory,
            power: self.power,
        }
    }

    /// The cache file to register, if one is configured and non-empty.
    pub fn effective_cache_file(&self) -> Option<&Path> {
        self.cache_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_mode_parse() {
        assert_eq!(FillMode::parse("ONE"), FillMode::One);
        assert_eq!(FillMode::parse("UNIFORM"), FillMode::Uniform);
        assert_eq!(FillMode::parse("NORMAL"), FillMode::Normal);
        assert_eq!(FillMode::parse("ZERO"), FillMode::Zero);
        assert_eq!(FillMode::parse("garbage"), FillMode::Zero);
        assert_eq!(FillMode::parse(""), FillMode::Zero);
    }

    #[test]
    fn test_schedule_config_clamps_threads() {
        let config = RunConfig {
            model_path: "m.mnn".into(),
            inputs: InputSpec::Broadcast(vec![1, 3, 224, 224]),
            backend: "VULKAN".into(),
            backup: String::new(),
            precision: TuningLevel::Low,
            memory: TuningLevel::Normal,
            power: TuningLevel::Normal,
            fill: FillMode::Zero,
            threads: 0,
            cache_file: None,
        };
        let sched = config.schedule_config();
        assert_eq!(sched.forward, ForwardType::Vulkan);
        assert_eq!(sched.backup, ForwardType::Cpu);
        assert_eq!(sched.num_threads, 1);
        assert_eq!(sched.precision, TuningLevel::Low);
    }

    #[test]
    fn test_empty_cache_file_is_skipped() {
        let mut config = RunConfig {
            model_path: "m.mnn".into(),
            inputs: InputSpec::Broadcast(vec![1]),
            backend: "CPU".into(),
            backup: String::new(),
            precision: TuningLevel::Normal,
            memory: TuningLevel::Normal,
            power: TuningLevel::Normal,
            fill: FillMode::Zero,
            threads: 1,
            cache_file: Some(PathBuf::new()),
        };
        assert!(config.effective_cache_file().is_none());
        config.cache_file = Some("kernel.cache".into());
        assert!(config.effective_cache_file().is_some());
        config.cache_file = None;
        assert!(config.effective_cache_file().is_none());
    }

    #[test]
    fn test_from_toml_broadcast() {
        let config = RunConfig::from_toml(
            r#"
            model_path = "./models/mobilenet.mnn"
            inputs = [1, 3, 224, 224]
            backend = "OPENCL"
            precision = "HIGH"
            fill = "UNIFORM"
            threads = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.inputs, InputSpec::Broadcast(vec![1, 3, 224, 224]));
        assert_eq!(config.backend, "OPENCL");
        assert_eq!(config.precision, TuningLevel::High);
        assert_eq!(config.fill, FillMode::Uniform);
        assert_eq!(config.threads, 4);
        assert_eq!(config.backup, "");
    }

    #[test]
    fn test_from_toml_named_inputs() {
        let config = RunConfig::from_toml(
            r#"
            model_path = "./models/two-stream.mnn"
            inputs = [
                { name = "rgb", dims = [1, 3, 224, 224] },
                { name = "flow", dims = [1, 2, 224, 224] },
            ]
            "#,
        )
        .unwrap();
        match config.inputs {
            InputSpec::Named(ref entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].name, "rgb");
                assert_eq!(entries[1].dims, vec![1, 2, 224, 224]);
            }
            _ => panic!("expected named inputs"),
        }
        assert_eq!(config.backend, "CPU");
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(RunConfig::from_toml("not toml at all [").is_err());
    }
}
