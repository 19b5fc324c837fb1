// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `mnn-bench info` command: print a model's declared inputs as JSON
//! without executing it.

use crate::InfoArgs;
use harness::api;

pub fn execute(args: InfoArgs) -> anyhow::Result<()> {
    let engine = super::select_engine(args.synthetic);
    let model = super::resolve_model(args.model, args.synthetic)?;

    let model_str = model
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("model path is not valid UTF-8"))?;
    println!("{}", api::get_model_info(engine.as_ref(), model_str));
    Ok(())
}
