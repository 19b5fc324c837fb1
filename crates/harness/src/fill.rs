// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Deterministic synthetic input generation.
//!
//! One [`InputFiller`] is created per run invocation with a fixed seed,
//! and the *same* instance fills every input tensor of that run. With
//! random fill modes, multiple inputs therefore draw from one
//! continuing stream rather than each restarting at the seed. This is
//! a preserved design choice, not an accident: reruns with identical
//! configuration are bit-reproducible, but the tensors of one run are
//! **not** statistically independent restarts of the generator. Callers
//! needing cross-tensor independence must derive per-tensor seeds
//! themselves.
//!
//! Stream stability is tied to the `rand`/`rand_distr` versions pinned
//! in `Cargo.lock`.

use crate::FillMode;
use engine::ElementType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// The fixed per-run seed. Not caller-supplied.
pub const FILL_SEED: u64 = 42;

/// Fills host staging buffers according to a [`FillMode`].
pub struct InputFiller {
    rng: StdRng,
}

impl InputFiller {
    /// Creates a filler freshly seeded for one run invocation.
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(FILL_SEED),
        }
    }

    /// Populates `buf` in place.
    ///
    /// Floating-point tensors honor all four modes; any other element
    /// type, or any unlisted combination, is filled with zero bytes.
    /// Floats are written little-endian, four bytes per element.
    pub fn fill(&mut self, buf: &mut [u8], dtype: ElementType, mode: FillMode) {
        match (dtype, mode) {
            (ElementType::Float, FillMode::One) => write_f32s(buf, || 1.0),
            (ElementType::Float, FillMode::Uniform) => {
                let rng = &mut self.rng;
                write_f32s(buf, || rng.gen::<f32>())
            }
            (ElementType::Float, FillMode::Normal) => {
                let rng = &mut self.rng;
                write_f32s(buf, || rng.sample(StandardNormal))
            }
            _ => buf.fill(0),
        }
    }
}

impl Default for InputFiller {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes consecutive f32 values into a little-endian byte buffer.
fn write_f32s(buf: &mut [u8], mut next: impl FnMut() -> f32) {
    for chunk in buf.chunks_exact_mut(4) {
        chunk.copy_from_slice(&next().to_le_bytes());
    }
}
