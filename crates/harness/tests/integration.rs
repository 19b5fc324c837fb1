// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: the full configuration → lifecycle → report
//! pipeline against the in-memory fake engine, plus the degraded stub
//! mode.

use engine::fake::{FakeEngine, ModelDescription, OpDescription};
use engine::{ElementType, ForwardType, StubEngine, TensorDesc, GUIDANCE, PROFILE_GUIDANCE};
use harness::api;
use std::path::PathBuf;

// ── Helpers ────────────────────────────────────────────────────

fn tensor(name: &str, dims: &[usize], dtype: ElementType) -> TensorDesc {
    TensorDesc {
        name: name.into(),
        dims: dims.to_vec(),
        dtype,
    }
}

/// A 1-input classifier whose input expects shape [1, 3, 224, 224].
fn classifier() -> ModelDescription {
    ModelDescription {
        name: "classifier".into(),
        inputs: vec![tensor("data", &[1, 3, 224, 224], ElementType::Float)],
        outputs: vec![tensor("prob", &[1, 1000], ElementType::Float)],
        ops: vec![
            OpDescription {
                name: "conv1".into(),
                op_type: "Convolution".into(),
                device_id: 0,
            },
            OpDescription {
                name: "fc".into(),
                op_type: "InnerProduct".into(),
                device_id: 0,
            },
        ],
        active_backends: Vec::new(),
    }
}

fn write_model(dir: &tempfile::TempDir, model: &ModelDescription) -> PathBuf {
    let path = dir.path().join("model.json");
    model.save(&path).unwrap();
    path
}

fn run_summary(model_path: &str, backend: &str) -> String {
    api::run_model(
        &FakeEngine::new(),
        model_path,
        &[1, 3, 224, 224],
        backend,
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    )
}

// ── Summary path ───────────────────────────────────────────────

#[test]
fn test_end_to_end_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, &classifier());

    let line = run_summary(path.to_str().unwrap(), "CPU");
    assert_eq!(line, "MNN 3.1.0 OK backend=CPU outputs=prob[1x1000]");
}

#[test]
fn test_summary_echoes_backend_as_given() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, &classifier());

    // "NNAPI" resolves to the NN target but the summary echoes the
    // caller's spelling.
    let line = run_summary(path.to_str().unwrap(), "NNAPI");
    assert!(line.contains("backend=NNAPI"));
}

#[test]
fn test_missing_model_is_prefixed_error() {
    let line = run_summary("/no/such/model.json", "CPU");
    assert!(line.starts_with("MNN ERROR: "), "{line}");
    assert!(line.contains("/no/such/model.json"));
}

// ── Multi-input path ───────────────────────────────────────────

#[test]
fn test_multi_input_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = classifier();
    model.inputs = vec![
        tensor("rgb", &[1, 3, 8, 8], ElementType::Float),
        tensor("flow", &[1, 2, 8, 8], ElementType::Float),
    ];
    let path = write_model(&dir, &model);

    let line = api::run_model_multi(
        &FakeEngine::new(),
        path.to_str().unwrap(),
        &["rgb".into(), "flow".into()],
        &[vec![1, 3, 16, 16], vec![1, 2, 16, 16]],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "UNIFORM",
        2,
        None,
    );
    assert!(line.starts_with("MNN 3.1.0 OK backend=CPU outputs="), "{line}");
}

#[test]
fn test_multi_input_length_mismatch_never_executes() {
    // The model path does not exist: if validation ran after loading,
    // we would see a load error instead of the mismatch.
    let line = api::run_model_multi(
        &FakeEngine::new(),
        "/no/such/model.json",
        &["a".into(), "b".into()],
        &[vec![1, 3]],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    );
    assert_eq!(line, "MNN ERROR: names/shapes length mismatch");
}

#[test]
fn test_multi_input_unknown_name_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, &classifier());

    let line = api::run_model_multi(
        &FakeEngine::new(),
        path.to_str().unwrap(),
        &["data".into(), "ghost".into()],
        &[vec![1, 3, 32, 32], vec![9, 9]],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    );
    assert!(line.starts_with("MNN 3.1.0 OK"), "{line}");
}

// ── Profile path ───────────────────────────────────────────────

#[test]
fn test_profile_json_structure_and_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(&dir, &classifier());

    let json = api::run_model_profile(
        &FakeEngine::new(),
        path.to_str().unwrap(),
        &[1, 3, 224, 224],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        2,
        None,
    );

    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["profile"], true);
    assert_eq!(doc["backend"], "CPU");
    assert_eq!(doc["backup"], "CPU");
    assert_eq!(doc["threads"], 2);

    let metrics = &doc["metrics"];
    let run_ms = metrics["runSession_ms"].as_f64().unwrap();
    for key in [
        "createInterpreter_ms",
        "createSession_ms",
        "resizeSession_ms",
        "runSession_ms",
    ] {
        assert!(metrics[key].as_f64().unwrap() >= 0.0, "{key}");
    }

    let outputs = doc["outputs"].as_array().unwrap();
    assert_eq!(outputs[0]["name"], "prob");
    assert_eq!(outputs[0]["shape"], serde_json::json!([1, 1000]));

    let ops = doc["ops"].as_array().unwrap();
    assert_eq!(ops.len(), 2);
    for (i, op) in ops.iter().enumerate() {
        assert_eq!(op["index"].as_u64().unwrap(), i as u64 + 1);
        let start = op["start_ms"].as_f64().unwrap();
        let end = op["end_ms"].as_f64().unwrap();
        assert!(start >= 0.0);
        assert!(end >= start);
        assert!(end <= run_ms, "op window {end} outside run {run_ms}");
        assert_eq!(op["backend"], "CPU");
    }
    assert_eq!(ops[0]["type"], "Convolution");
    assert_eq!(ops[0]["name"], "conv1");
}

#[test]
fn test_profile_attribution_with_auto_backend() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = classifier();
    model.ops = vec![
        OpDescription {
            name: "conv1".into(),
            op_type: "Convolution".into(),
            device_id: 0xbeef,
        },
        OpDescription {
            name: "argmax".into(),
            op_type: "ArgMax".into(),
            device_id: 0,
        },
    ];
    model.active_backends = vec![ForwardType::Cpu.raw(), ForwardType::Vulkan.raw()];
    let path = write_model(&dir, &model);

    let json = api::run_model_profile(
        &FakeEngine::new(),
        path.to_str().unwrap(),
        &[1, 3, 224, 224],
        "AUTO",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    );

    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["backend"], "AUTO");
    let ops = doc["ops"].as_array().unwrap();
    assert_eq!(ops[0]["backend"], "VULKAN");
    assert_eq!(ops[1]["backend"], "CPU");
}

#[test]
fn test_profile_error_is_prefixed() {
    let json = api::run_model_profile(
        &FakeEngine::new(),
        "/no/such/model.json",
        &[1],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    );
    assert!(json.starts_with("MNN PROFILE ERROR: "), "{json}");
}

// ── Model info ─────────────────────────────────────────────────

#[test]
fn test_get_model_info_reports_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = classifier();
    model.inputs.push(tensor("mask", &[1, 224, 224], ElementType::Int));
    let path = write_model(&dir, &model);

    let json = api::get_model_info(&FakeEngine::new(), path.to_str().unwrap());
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    let inputs = doc["inputs"].as_array().unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0]["name"], "data");
    assert_eq!(inputs[0]["dims"], serde_json::json!([1, 3, 224, 224]));
    assert_eq!(inputs[0]["dtype"], "float");
    assert_eq!(inputs[1]["dtype"], "int");
}

#[test]
fn test_get_model_info_missing_model() {
    let json = api::get_model_info(&FakeEngine::new(), "/no/such/model.json");
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(doc["error"].as_str().unwrap().contains("/no/such/model.json"));
}

// ── Degraded (stub) mode ───────────────────────────────────────

#[test]
fn test_stub_mode_returns_guidance_from_every_entry_point() {
    let engine = StubEngine;

    let summary = api::run_model(
        &engine, "m.mnn", &[1], "CPU", "CPU", "NORMAL", "NORMAL", "NORMAL", "ZERO", 1, None,
    );
    assert_eq!(summary, GUIDANCE);

    let profile = api::run_model_profile(
        &engine, "m.mnn", &[1], "CPU", "CPU", "NORMAL", "NORMAL", "NORMAL", "ZERO", 1, None,
    );
    assert_eq!(profile, PROFILE_GUIDANCE);

    let multi = api::run_model_multi(
        &engine,
        "m.mnn",
        &["a".into()],
        &[vec![1]],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    );
    assert_eq!(multi, GUIDANCE);

    let multi_profile = api::run_model_multi_profile(
        &engine,
        "m.mnn",
        &["a".into()],
        &[vec![1]],
        "CPU",
        "CPU",
        "NORMAL",
        "NORMAL",
        "NORMAL",
        "ZERO",
        1,
        None,
    );
    assert_eq!(multi_profile, PROFILE_GUIDANCE);

    let info = api::get_model_info(&engine, "m.mnn");
    let doc: serde_json::Value = serde_json::from_str(&info).unwrap();
    assert_eq!(doc["error"].as_str().unwrap(), GUIDANCE);
}
