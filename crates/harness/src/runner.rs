// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Session lifecycle management: one configured forward pass from model
//! load through output readback.
//!
//! Each step is a hard sequence point; any failure aborts the run and
//! drops the session (and interpreter), which releases the engine
//! resources on the failure path exactly as on success. The same
//! execution core backs both the summary path ([`run_once`]) and the
//! profiled path ([`crate::run_once_profiled`]), which adds monotonic
//! checkpoints and an operator observer around it.

use crate::{HarnessError, InputFiller, InputSpec, RunConfig, SummaryReport};
use engine::{Engine, ForwardType, OpObserver, ScheduleConfig, TensorDesc};
use std::path::Path;
use std::time::{Duration, Instant};

/// Raw timings and results of one executed session, before reporting.
pub(crate) struct Execution {
    /// Output tensor names and result shapes, in engine order.
    pub outputs: Vec<TensorDesc>,
    /// Raw backend ids the engine actually scheduled onto.
    pub active_backends: Vec<i32>,
    /// Thread count in effect after engine-side clamping.
    pub thread_count: usize,
    /// Wall time of model load (interpreter creation).
    pub create_interpreter: Duration,
    /// Wall time of session creation.
    pub create_session: Duration,
    /// Wall time of the session-level resize commit.
    pub resize_session: Duration,
    /// Wall time of the forward pass.
    pub run_session: Duration,
    /// Anchor taken immediately before the run began; operator offsets
    /// are measured against it.
    pub run_anchor: Instant,
}

/// Executes the full lifecycle for `config`, optionally instrumented
/// with a per-operator observer.
pub(crate) fn execute(
    engine: &dyn Engine,
    config: &RunConfig,
    observer: Option<&mut dyn OpObserver>,
) -> Result<Execution, HarnessError> {
    // 1. Load the model. Fatal on failure, never retried.
    let t0 = Instant::now();
    let mut interpreter = engine.load_model(&config.model_path)?;
    let create_interpreter = t0.elapsed();

    // 2. Optional kernel cache registration; empty/absent is a no-op.
    if let Some(cache) = config.effective_cache_file() {
        interpreter.set_cache_file(cache)?;
    }

    // 3–4. Schedule configuration and session creation.
    let sched = config.schedule_config();
    tracing::debug!(
        "creating session: backend={} backup={} threads={}",
        sched.forward,
        sched.backup,
        sched.num_threads,
    );
    let t1 = Instant::now();
    let mut session = interpreter.create_session(&sched)?;
    let create_session = t1.elapsed();

    // 5. Request resizes.
    match &config.inputs {
        // Single-input mode applies the one shape to every input
        // tensor; models whose inputs differ in shape need the named
        // path.
        InputSpec::Broadcast(shape) => {
            for desc in session.inputs() {
                session.resize_input(&desc.name, shape)?;
            }
        }
        InputSpec::Named(entries) => {
            for entry in entries {
                // Names the model does not declare are skipped, not
                // errors (historical behavior).
                if !session.resize_input(&entry.name, &entry.dims)? {
                    tracing::warn!("model declares no input named '{}'", entry.name);
                }
            }
        }
    }

    // 6. Commit every pending resize in one session-level call.
    let t2 = Instant::now();
    session.commit_resizes()?;
    let resize_session = t2.elapsed();

    // 7. Stage and copy every input. The filler is seeded once here so
    //    all tensors of this run draw from one continuing stream.
    let mut filler = InputFiller::new();
    for desc in session.inputs() {
        let mut staging = vec![0u8; desc.size_bytes()];
        filler.fill(&mut staging, desc.dtype, config.fill);
        session.write_input(&desc.name, &staging)?;
    }

    // 8. Synchronous forward pass.
    let run_anchor = Instant::now();
    session.run(observer)?;
    let run_session = run_anchor.elapsed();

    // 9. Read outputs and session facts before release.
    let outputs = session.outputs();
    let active_backends = session.active_backends();
    let thread_count = session.thread_count();

    tracing::debug!(
        "run complete: {} outputs, active backends {:?}",
        outputs.len(),
        active_backends,
    );

    // 10. Session and interpreter drop here, released on this path and
    //     on every early `?` return above.
    Ok(Execution {
        outputs,
        active_backends,
        thread_count,
        create_interpreter,
        create_session,
        resize_session,
        run_session,
        run_anchor,
    })
}

/// Runs one forward pass and produces the compact summary.
///
/// Covers both the single-input and multi-input variants via
/// [`InputSpec`]; the lifecycle is identical.
pub fn run_once(engine: &dyn Engine, config: &RunConfig) -> Result<SummaryReport, HarnessError> {
    let execution = execute(engine, config, None)?;
    Ok(SummaryReport {
        engine_id: engine.runtime_version().to_string(),
        backend: config.backend.clone(),
        outputs: execution.outputs,
    })
}

/// Enumerates a model's declared inputs without executing it.
///
/// Always uses a CPU-backend session regardless of any later run's
/// requested backend, and never triggers resize, staging, or a forward
/// pass.
pub fn model_info(engine: &dyn Engine, model_path: &Path) -> Result<crate::ModelInfo, HarnessError> {
    let mut interpreter = engine.load_model(model_path)?;
    let sched = ScheduleConfig {
        forward: ForwardType::Cpu,
        ..ScheduleConfig::default()
    };
    let session = interpreter.create_session(&sched)?;
    let inputs = session.inputs();
    // Session drops here without ever running.
    Ok(crate::ModelInfo { inputs })
}
