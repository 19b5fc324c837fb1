// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! String-boundary entry points.
//!
//! Each function is one public operation: synchronous, returning a
//! single string, and never propagating a fault across the boundary.
//! Faults become `"MNN ERROR: …"` (summary paths) or
//! `"MNN PROFILE ERROR: …"` (profile paths); a missing engine library
//! is not an error but the documented degraded mode, returning the
//! fixed guidance text unprefixed.
//!
//! Parameter strings are free-form on purpose: backend, precision,
//! memory, power, and fill names all resolve totally with explicit
//! defaults, so no caller input can panic the boundary.

use crate::{FillMode, HarnessError, InputSpec, NamedShape, RunConfig};
use engine::{Engine, TuningLevel, PROFILE_GUIDANCE};
use std::path::Path;

/// Shared parameter-to-config translation.
#[allow(clippy::too_many_arguments)]
fn build_config(
    model_path: &str,
    inputs: InputSpec,
    backend: &str,
    backup: &str,
    memory_mode: &str,
    precision_mode: &str,
    power_mode: &str,
    fill_mode: &str,
    threads: i32,
    cache_file: Option<&str>,
) -> RunConfig {
    RunConfig {
        model_path: model_path.into(),
        inputs,
        backend: backend.to_string(),
        backup: backup.to_string(),
        precision: TuningLevel::parse(precision_mode),
        memory: TuningLevel::parse(memory_mode),
        power: TuningLevel::parse(power_mode),
        fill: FillMode::parse(fill_mode),
        threads: threads.max(1) as usize,
        cache_file: cache_file.map(Into::into),
    }
}

fn summary_result(result: Result<crate::SummaryReport, HarnessError>) -> String {
    match result {
        Ok(report) => report.to_line(),
        Err(HarnessError::EngineUnavailable(guidance)) => guidance,
        Err(e) => format!("MNN ERROR: {e}"),
    }
}

fn profile_result(result: Result<crate::ProfileReport, HarnessError>) -> String {
    match result {
        Ok(report) => report.to_json(),
        Err(HarnessError::EngineUnavailable(_)) => PROFILE_GUIDANCE.to_string(),
        Err(e) => format!("MNN PROFILE ERROR: {e}"),
    }
}

/// Runs a pre-built configuration and renders the summary string,
/// applying the boundary's error conversion.
pub fn run_with_config(engine: &dyn Engine, config: &RunConfig) -> String {
    summary_result(crate::run_once(engine, config))
}

/// Runs a pre-built configuration with instrumentation and renders the
/// profile JSON string, applying the boundary's error conversion.
pub fn profile_with_config(engine: &dyn Engine, config: &RunConfig) -> String {
    profile_result(crate::run_once_profiled(engine, config))
}

/// Runs a single-input forward pass and returns the one-line summary.
///
/// The one `shape` is applied to every input tensor (documented
/// single-input simplification).
#[allow(clippy::too_many_arguments)]
pub fn run_model(
    engine: &dyn Engine,
    model_path: &str,
    shape: &[usize],
    backend: &str,
    backup: &str,
    memory_mode: &str,
    precision_mode: &str,
    power_mode: &str,
    fill_mode: &str,
    threads: i32,
    cache_file: Option<&str>,
) -> String {
    let config = build_config(
        model_path,
        InputSpec::Broadcast(shape.to_vec()),
        backend,
        backup,
        memory_mode,
        precision_mode,
        power_mode,
        fill_mode,
        threads,
        cache_file,
    );
    summary_result(crate::run_once(engine, &config))
}

/// Runs a single-input forward pass with instrumentation and returns
/// the profile JSON document.
#[allow(clippy::too_many_arguments)]
pub fn run_model_profile(
    engine: &dyn Engine,
    model_path: &str,
    shape: &[usize],
    backend: &str,
    backup: &str,
    memory_mode: &str,
    precision_mode: &str,
    power_mode: &str,
    fill_mode: &str,
    threads: i32,
    cache_file: Option<&str>,
) -> String {
    let config = build_config(
        model_path,
        InputSpec::Broadcast(shape.to_vec()),
        backend,
        backup,
        memory_mode,
        precision_mode,
        power_mode,
        fill_mode,
        threads,
        cache_file,
    );
    profile_result(crate::run_once_profiled(engine, &config))
}

/// Pairs input names with their shapes, failing fatally on a length
/// mismatch before any engine work happens.
fn named_inputs(
    input_names: &[String],
    input_shapes: &[Vec<usize>],
) -> Result<InputSpec, HarnessError> {
    if input_names.len() != input_shapes.len() {
        return Err(HarnessError::InputMismatch);
    }
    Ok(InputSpec::Named(
        input_names
            .iter()
            .zip(input_shapes)
            .map(|(name, dims)| NamedShape {
                name: name.clone(),
                dims: dims.clone(),
            })
            .collect(),
    ))
}

/// Runs a multi-input forward pass and returns the one-line summary.
///
/// `input_names` and `input_shapes` must have equal length; a mismatch
/// fails before the model is even loaded; the run never partially
/// executes.
#[allow(clippy::too_many_arguments)]
pub fn run_model_multi(
    engine: &dyn Engine,
    model_path: &str,
    input_names: &[String],
    input_shapes: &[Vec<usize>],
    backend: &str,
    backup: &str,
    memory_mode: &str,
    precision_mode: &str,
    power_mode: &str,
    fill_mode: &str,
    threads: i32,
    cache_file: Option<&str>,
) -> String {
    let result = named_inputs(input_names, input_shapes).and_then(|inputs| {
        let config = build_config(
            model_path,
            inputs,
            backend,
            backup,
            memory_mode,
            precision_mode,
            power_mode,
            fill_mode,
            threads,
            cache_file,
        );
        crate::run_once(engine, &config)
    });
    summary_result(result)
}

/// Multi-input sibling of [`run_model_profile`].
#[allow(clippy::too_many_arguments)]
pub fn run_model_multi_profile(
    engine: &dyn Engine,
    model_path: &str,
    input_names: &[String],
    input_shapes: &[Vec<usize>],
    backend: &str,
    backup: &str,
    memory_mode: &str,
    precision_mode: &str,
    power_mode: &str,
    fill_mode: &str,
    threads: i32,
    cache_file: Option<&str>,
) -> String {
    let result = named_inputs(input_names, input_shapes).and_then(|inputs| {
        let config = build_config(
            model_path,
            inputs,
            backend,
            backup,
            memory_mode,
            precision_mode,
            power_mode,
            fill_mode,
            threads,
            cache_file,
        );
        crate::run_once_profiled(engine, &config)
    });
    profile_result(result)
}

/// Enumerates a model's declared inputs as
/// `{"inputs":[{"name","dims","dtype"}]}` without ever executing it.
///
/// Failures (including engine unavailability) come back as
/// `{"error":"…"}` rather than a prefixed line, keeping the result
/// parseable.
pub fn get_model_info(engine: &dyn Engine, model_path: &str) -> String {
    match crate::model_info(engine, Path::new(model_path)) {
        Ok(info) => info.to_json(),
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}
