// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Profiled execution: coarse lifecycle checkpoints plus the
//! per-operator timeline.
//!
//! All durations are differences of two [`Instant`]s on the same
//! monotonic clock, reported in fractional milliseconds at fixed
//! 3-decimal precision. Operator start/end offsets are measured against
//! one anchor taken immediately before the run begins.

use crate::report::round3;
use crate::runner;
use crate::{
    DeviceAttribution, HarnessError, Metrics, OperatorRecord, OutputShape, ProfileReport,
    RunConfig,
};
use engine::{Engine, ForwardType, OpInfo, OpObserver};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One completed operator: metadata plus absolute timestamps.
#[derive(Debug, Clone)]
struct OpSample {
    info: OpInfo,
    start: Instant,
    end: Instant,
}

/// Explicit accumulator for the engine's before/after operator
/// callbacks, keyed by stable operator identity.
///
/// The timeline records absolute monotonic timestamps; conversion to
/// anchor-relative offsets happens once, after execution, in
/// [`OpTimeline::into_records`]. An engine that never invokes the
/// callbacks simply leaves the timeline empty.
#[derive(Debug, Default)]
pub struct OpTimeline {
    /// Start timestamps of operators whose after-callback is pending.
    started: HashMap<u64, Instant>,
    /// Completed operators in completion order.
    samples: Vec<OpSample>,
}

impl OpTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed operators recorded so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Converts the timeline into ordered records with offsets relative
    /// to `anchor`, labeling each operator via `attribution`.
    fn into_records(self, anchor: Instant, attribution: &DeviceAttribution) -> Vec<OperatorRecord> {
        self.samples
            .into_iter()
            .enumerate()
            .map(|(i, sample)| {
                let start = sample.start.saturating_duration_since(anchor);
                let end = sample.end.saturating_duration_since(anchor);
                let duration = sample.end.saturating_duration_since(sample.start);
                OperatorRecord {
                    index: i + 1,
                    op_type: sample.info.op_type.clone(),
                    name: sample.info.name.clone(),
                    backend: attribution
                        .label_for(sample.info.output_device_id)
                        .to_string(),
                    start_ms: round3(as_ms(start)),
                    end_ms: round3(as_ms(end)),
                    duration_ms: round3(as_ms(duration)),
                }
            })
            .collect()
    }
}

impl OpObserver for OpTimeline {
    fn before_op(&mut self, op: &OpInfo) {
        self.started.insert(op.id, Instant::now());
    }

    fn after_op(&mut self, op: &OpInfo) {
        let end = Instant::now();
        // An after-callback without a matching before yields a
        // zero-duration record rather than being dropped.
        let start = self.started.remove(&op.id).unwrap_or(end);
        self.samples.push(OpSample {
            info: op.clone(),
            start,
            end,
        });
    }
}

fn as_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Runs one forward pass with full instrumentation and produces the
/// profile report.
pub fn run_once_profiled(
    engine: &dyn Engine,
    config: &RunConfig,
) -> Result<ProfileReport, HarnessError> {
    let mut timeline = OpTimeline::new();
    let execution = runner::execute(engine, config, Some(&mut timeline))?;

    let requested = ForwardType::resolve(&config.backend);
    let attribution = DeviceAttribution::new(requested, &execution.active_backends);
    tracing::debug!(
        "profiled run: {} ops recorded, device label {}",
        timeline.len(),
        attribution.device_label(),
    );
    let ops = timeline.into_records(execution.run_anchor, &attribution);

    Ok(ProfileReport {
        profile: true,
        backend: requested.label().to_string(),
        backup: ForwardType::resolve(&config.backup).label().to_string(),
        threads: execution.thread_count,
        metrics: Metrics {
            create_interpreter_ms: round3(as_ms(execution.create_interpreter)),
            create_session_ms: round3(as_ms(execution.create_session)),
            resize_session_ms: round3(as_ms(execution.resize_session)),
            run_session_ms: round3(as_ms(execution.run_session)),
        },
        outputs: execution
            .outputs
            .into_iter()
            .map(|t| OutputShape {
                name: t.name,
                shape: t.dims,
            })
            .collect(),
        ops,
    })
}
