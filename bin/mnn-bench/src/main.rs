// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # mnn-bench
//!
//! Command-line benchmarking harness for MNN models.
//!
//! ## Usage
//! ```bash
//! # One forward pass, compact summary
//! mnn-bench run --model ./mobilenet.mnn --shape 1x3x224x224 --backend VULKAN
//!
//! # Per-operator timing profile as JSON
//! mnn-bench run --model ./mobilenet.mnn --backend AUTO --profile
//!
//! # Multi-input model
//! mnn-bench run --model ./two-stream.mnn \
//!     --input rgb=1x3x224x224 --input flow=1x2x224x224
//!
//! # Inspect declared inputs without executing
//! mnn-bench info --model ./mobilenet.mnn
//!
//! # No libMNN bundled? Exercise the pipeline on the in-memory fake:
//! mnn-bench run --synthetic --profile
//! ```

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mnn-bench",
    about = "Benchmark MNN models across execution backends",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one forward pass and print a summary or a JSON profile.
    Run(RunArgs),

    /// Enumerate a model's declared inputs without executing it.
    Info(InfoArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to the model file.
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Path to a TOML run configuration (flags below are ignored except
    /// --model, which overrides the configured path).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input shape applied to every input, e.g. "1x3x224x224".
    #[arg(long, default_value = "1x3x224x224")]
    shape: String,

    /// Named input shape for multi-input models, e.g.
    /// "rgb=1x3x224x224". Repeatable; overrides --shape.
    #[arg(long = "input")]
    inputs: Vec<String>,

    /// Requested backend: CPU, AUTO, VULKAN, OPENCL, OPENGL, METAL,
    /// CUDA, NNAPI. Unrecognized names run on CPU.
    #[arg(short, long, default_value = "CPU")]
    backend: String,

    /// Fallback backend for unsupported operators.
    #[arg(long, default_value = "CPU")]
    backup: String,

    /// Compute precision: LOW, NORMAL, HIGH.
    #[arg(long, default_value = "NORMAL")]
    precision: String,

    /// Memory mode: LOW, NORMAL, HIGH.
    #[arg(long, default_value = "NORMAL")]
    memory: String,

    /// Power mode: LOW, NORMAL, HIGH.
    #[arg(long, default_value = "NORMAL")]
    power: String,

    /// Synthetic input fill: ZERO, ONE, UNIFORM, NORMAL.
    #[arg(long, default_value = "ZERO")]
    fill: String,

    /// Worker thread count (clamped to at least 1).
    #[arg(short, long, default_value_t = 1)]
    threads: i32,

    /// Kernel cache file for GPU backends.
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Emit the per-operator JSON profile instead of the summary line.
    #[arg(short, long)]
    profile: bool,

    /// Run against the in-memory fake engine (no libMNN required).
    #[arg(long)]
    synthetic: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Path to the model file.
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Inspect against the in-memory fake engine (no libMNN required).
    #[arg(long)]
    synthetic: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
