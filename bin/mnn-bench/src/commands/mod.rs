// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI subcommand implementations and shared setup.

pub mod info;
pub mod run;

use engine::fake::{FakeEngine, ModelDescription};
use engine::Engine;
use std::path::PathBuf;

/// Initializes tracing based on `-v` count. `RUST_LOG` wins when set.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Picks the engine for a command: the build's default engine, or the
/// in-memory fake when `--synthetic` is given.
pub fn select_engine(synthetic: bool) -> Box<dyn Engine> {
    if synthetic {
        Box::new(FakeEngine::new())
    } else {
        engine::default_engine()
    }
}

/// Resolves the model path for a command. With `--synthetic` and no
/// explicit model, a demo model description is written to the temp
/// directory.
pub fn resolve_model(
    model: Option<PathBuf>,
    synthetic: bool,
) -> anyhow::Result<PathBuf> {
    match model {
        Some(path) => Ok(path),
        None if synthetic => {
            let path = std::env::temp_dir().join("mnn-bench-demo.json");
            ModelDescription::demo()
                .save(&path)
                .map_err(|e| anyhow::anyhow!("cannot write demo model: {e}"))?;
            tracing::info!("synthetic demo model written to '{}'", path.display());
            Ok(path)
        }
        None => anyhow::bail!("--model is required (or pass --synthetic for the demo)"),
    }
}

/// Parses a "1x3x224x224"-style shape.
pub fn parse_shape(s: &str) -> anyhow::Result<Vec<usize>> {
    s.split('x')
        .map(|d| {
            d.trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("invalid shape '{s}': bad dimension '{d}'"))
        })
        .collect()
}

/// Parses a "name=1x3x224x224"-style named input.
pub fn parse_named_input(s: &str) -> anyhow::Result<harness::NamedShape> {
    let (name, dims) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid input '{s}': expected name=DIMSxDIMS..."))?;
    if name.is_empty() {
        anyhow::bail!("invalid input '{s}': empty name");
    }
    Ok(harness::NamedShape {
        name: name.to_string(),
        dims: parse_shape(dims)?,
    })
}
