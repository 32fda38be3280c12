// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Manual `n % divisor == 0` used instead of `n.is_multiple_of(divisor)` for stable Rust
// compatibility.
#![allow(clippy::manual_is_multiple_of)]
/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # compbrain Circuit
//!
//! Wires neurons and synapses into a bipartite graph by name and drives them
//! through the two-phase step protocol.
//!
//! ## Architecture
//! - Components live in arenas owned by the circuit
//! - Edges are handle lists, resolved once at construction
//! - Single-threaded: one sequential pass over synapses, then neurons
//! - Any component failure aborts the run without rollback

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod circuit;
pub mod error;
pub mod trajectory;

pub use circuit::{Circuit, NeuronHandle, SynapseHandle};
pub use error::{CircuitError, EndpointRole, Result};
pub use trajectory::Trajectory;
