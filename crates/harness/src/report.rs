// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Report values and their serialized forms.
//!
//! Reports are pure, caller-owned values with no reference back to the
//! session. The profile JSON key names and their order are a contract
//! with downstream parsers; serde emits struct fields in declaration
//! order, so the field order below is load-bearing; do not reorder.

use engine::TensorDesc;

/// Rounds fractional milliseconds to the fixed 3-decimal precision of
/// the profile contract.
pub(crate) fn round3(ms: f64) -> f64 {
    (ms * 1000.0).round() / 1000.0
}

/// Result of a non-profiled run.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Engine identity, e.g. `"MNN 3.1.0"`.
    pub engine_id: String,
    /// The requested backend, echoed exactly as the caller supplied it.
    pub backend: String,
    /// Output tensor names and result shapes, in engine order.
    pub outputs: Vec<TensorDesc>,
}

impl SummaryReport {
    /// Renders the one-line human summary:
    /// `"MNN 3.1.0 OK backend=CPU outputs=prob[1x10], aux[1x5]"`.
    pub fn to_line(&self) -> String {
        let outputs = self
            .outputs
            .iter()
            .map(|t| {
                let dims = t
                    .dims
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("x");
                format!("{}[{dims}]", t.name)
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} OK backend={} outputs={outputs}",
            self.engine_id, self.backend,
        )
    }
}

/// The four coarse-grained lifecycle timings, in milliseconds.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Metrics {
    #[serde(rename = "createInterpreter_ms")]
    pub create_interpreter_ms: f64,
    #[serde(rename = "createSession_ms")]
    pub create_session_ms: f64,
    #[serde(rename = "resizeSession_ms")]
    pub resize_session_ms: f64,
    #[serde(rename = "runSession_ms")]
    pub run_session_ms: f64,
}

/// One output tensor in the profile JSON.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OutputShape {
    pub name: String,
    pub shape: Vec<usize>,
}

/// One operator of the execution timeline.
///
/// Offsets are relative to the single run-start anchor, not to the
/// previous operator, so records sort cleanly and gaps or overlaps are
/// directly visible.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OperatorRecord {
    /// 1-based position in completion order.
    pub index: usize,
    #[serde(rename = "type")]
    pub op_type: String,
    pub name: String,
    /// Attributed backend label, from per-operator device affinity.
    pub backend: String,
    pub start_ms: f64,
    pub end_ms: f64,
    pub duration_ms: f64,
}

/// Result of a profiled run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileReport {
    /// Always `true`; lets consumers distinguish profile documents.
    pub profile: bool,
    /// Canonical label of the requested backend.
    pub backend: String,
    /// Canonical label of the fallback backend.
    pub backup: String,
    /// Thread count in effect after engine-side clamping.
    pub threads: usize,
    pub metrics: Metrics,
    pub outputs: Vec<OutputShape>,
    /// Per-operator timeline; empty when the engine build does not
    /// invoke instrumentation callbacks. That is a valid profile, not a
    /// degraded one.
    pub ops: Vec<OperatorRecord>,
}

impl ProfileReport {
    /// Serializes the profile as a single JSON object with the fixed
    /// key set and order.
    pub fn to_json(&self) -> String {
        // Serialization of these plain structs cannot fail.
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!("{{\"error\":\"profile serialization failed: {e}\"}}")
        })
    }
}

/// Declared inputs of a model, as reported by [`crate::model_info`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelInfo {
    pub inputs: Vec<TensorDesc>,
}

impl ModelInfo {
    /// Serializes as `{"inputs":[{"name","dims","dtype"}]}`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!("{{\"error\":\"info serialization failed: {e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::ElementType;

    fn tensor(name: &str, dims: &[usize]) -> TensorDesc {
        TensorDesc {
            name: name.into(),
            dims: dims.to_vec(),
            dtype: ElementType::Float,
        }
    }

    #[test]
    fn test_summary_line_format() {
        let report = SummaryReport {
            engine_id: "MNN 3.1.0".into(),
            backend: "NNAPI".into(),
            outputs: vec![tensor("prob", &[1, 10]), tensor("aux", &[1, 5])],
        };
        assert_eq!(
            report.to_line(),
            "MNN 3.1.0 OK backend=NNAPI outputs=prob[1x10], aux[1x5]",
        );
    }

    #[test]
    fn test_profile_json_key_order() {
        let report = ProfileReport {
            profile: true,
            backend: "AUTO".into(),
            backup: "CPU".into(),
            threads: 2,
            metrics: Metrics {
                create_interpreter_ms: 1.5,
                create_session_ms: 0.25,
                resize_session_ms: 0.125,
                run_session_ms: 3.0,
            },
            outputs: vec![OutputShape {
                name: "prob".into(),
                shape: vec![1, 10],
            }],
            ops: vec![OperatorRecord {
                index: 1,
                op_type: "Convolution".into(),
                name: "conv1".into(),
                backend: "CPU".into(),
                start_ms: 0.0,
                end_ms: 1.0,
                duration_ms: 1.0,
            }],
        };

        let json = report.to_json();
        // Key order is a parsing contract.
        let backend_pos = json.find("\"backend\"").unwrap();
        let backup_pos = json.find("\"backup\"").unwrap();
        let metrics_pos = json.find("\"metrics\"").unwrap();
        let outputs_pos = json.find("\"outputs\"").unwrap();
        let ops_pos = json.find("\"ops\"").unwrap();
        assert!(json.starts_with("{\"profile\":true"));
        assert!(backend_pos < backup_pos);
        assert!(backup_pos < metrics_pos);
        assert!(metrics_pos < outputs_pos);
        assert!(outputs_pos < ops_pos);
        assert!(json.contains("\"createInterpreter_ms\":1.5"));
        assert!(json.contains("\"index\":1"));
        assert!(json.contains("\"type\":\"Convolution\""));
    }

    #[test]
    fn test_model_info_json() {
        let info = ModelInfo {
            inputs: vec![TensorDesc {
                name: "data".into(),
                dims: vec![1, 3, 224, 224],
                dtype: ElementType::Float,
            }],
        };
        assert_eq!(
            info.to_json(),
            r#"{"inputs":[{"name":"data","dims":[1,3,224,224],"dtype":"float"}]}"#,
        );
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(0.0004), 0.0);
        assert_eq!(round3(2.0), 2.0);
    }
}
