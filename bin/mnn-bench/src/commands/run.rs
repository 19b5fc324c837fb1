// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `mnn-bench run` command: execute one forward pass and print the
//! summary line or the JSON profile.

use crate::RunArgs;
use harness::{api, FillMode, InputSpec, RunConfig};
use engine::TuningLevel;

pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let engine = super::select_engine(args.synthetic);
    let config = build_config(&args)?;

    tracing::info!(
        "run: model='{}' backend={} fill={:?} threads={} profile={}",
        config.model_path.display(),
        config.backend,
        config.fill,
        config.threads,
        args.profile,
    );

    let output = if args.profile {
        api::profile_with_config(engine.as_ref(), &config)
    } else {
        api::run_with_config(engine.as_ref(), &config)
    };
    println!("{output}");
    Ok(())
}

/// Builds the run configuration from a TOML file or from flags.
fn build_config(args: &RunArgs) -> anyhow::Result<RunConfig> {
    if let Some(config_path) = &args.config {
        let mut config = RunConfig::from_file(config_path)
            .map_err(|e| anyhow::anyhow!("cannot load '{}': {e}", config_path.display()))?;
        if let Some(model) = &args.model {
            config.model_path = model.clone();
        }
        return Ok(config);
    }

    let model_path = super::resolve_model(args.model.clone(), args.synthetic)?;
    let inputs = if args.inputs.is_empty() {
        InputSpec::Broadcast(super::parse_shape(&args.shape)?)
    } else {
        InputSpec::Named(
            args.inputs
                .iter()
                .map(|s| super::parse_named_input(s))
                .collect::<anyhow::Result<Vec<_>>>()?,
        )
    };

    Ok(RunConfig {
        model_path,
        inputs,
        backend: args.backend.clone(),
        backup: args.backup.clone(),
        precision: TuningLevel::parse(&args.precision),
        memory: TuningLevel::parse(&args.memory),
        power: TuningLevel::parse(&args.power),
        fill: FillMode::parse(&args.fill),
        threads: args.threads.max(1) as usize,
        cache_file: args.cache.clone(),
    })
}
