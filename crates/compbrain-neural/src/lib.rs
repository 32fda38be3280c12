// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # compbrain Neural Models
//!
//! Pluggable components for small biophysical circuits:
//! - **Types**: state traces, construction overrides, errors
//! - **Models**: the component contract and the bundled neuron models
//!   (Morris-Lecar, Hodgkin-Huxley, integrate-and-fire, photo-insensitive)
//! - **Synapse**: graded-conductance synapse and current-injection source
//!
//! Every model follows the same recipe: read the last recorded state, apply
//! one explicit Euler step, append the new state.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Declare a model parameter struct with its defaults and key dispatch
macro_rules! model_parameters {
    (
        $(#[$meta:meta])*
        pub struct $ty:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $key:literal = $default:expr
            ),* $(,)?
        }
        validate($p:ident) $validate:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $ty {
            $(
                $(#[$field_meta])*
                pub $field: f64,
            )*
        }

        impl Default for $ty {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                }
            }
        }

        impl $crate::types::ModelParameters for $ty {
            const NAMES: &'static [&'static str] = &[$($key),*];

            fn get(&self, key: &str) -> Option<f64> {
                match key {
                    $($key => Some(self.$field),)*
                    _ => None,
                }
            }

            fn set(&mut self, key: &str, value: f64) -> bool {
                match key {
                    $($key => {
                        self.$field = value;
                        true
                    })*
                    _ => false,
                }
            }

            fn validate(&self) -> core::result::Result<(), (&'static str, &'static str)> {
                let $p = self;
                $validate
            }
        }
    };
}

// Core type definitions
pub mod types;

// Component contract and neuron models
pub mod models;

// Synapse models
pub mod synapse;

pub use types::{
    apply_overrides, ModelError, ModelParameters, Overrides, ParameterSnapshot, Result, StateMap,
    StateTrace,
};

pub use models::{
    Component, HodgkinHuxleyNeuron, HodgkinHuxleyParameters, IntegrateAndFireNeuron,
    IntegrateAndFireParameters, MorrisLecarNeuron, MorrisLecarParameters, Neuron, NeuronKind,
    NeuronModel, PhotoInsensitiveNeuron, PhotoInsensitiveParameters, SynapseModel,
    INJECTED_CURRENT, SYNAPTIC_CURRENT, VOLTAGE,
};

pub use synapse::{
    Endpoint, GradedSynapse, GradedSynapseParameters, InjectCurrent, InjectCurrentOptions,
    StimulusKind, Synapse, SynapseKind,
};
