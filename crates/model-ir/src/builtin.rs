// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The model artifact compiled into the binary.
//!
//! `sine-extrapolator` predicts the next sample of a sampled sine wave from
//! the previous seven using the two-term recurrence
//! `x[n+1] ≈ 2·cos(θ)·x[n] − x[n−1]` with `2·cos(θ) = 1.90625`. The hidden
//! layer splits the estimate into positive and negative ReLU halves and the
//! output layer recombines them.

/// JSON manifest of the built-in model.
pub const BUILTIN_MODEL_JSON: &str = include_str!("../../../models/sine_extrapolator.json");
