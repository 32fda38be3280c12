// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Construction-time overrides for model parameters and initial states

use std::collections::BTreeMap;

use super::error::{ModelError, Result};
use super::state::StateMap;

/// Override mapping passed to a component constructor
///
/// Keys are routed to the model's parameters first, then to its state traces
/// (where they replace the initial condition). Any other key is rejected.
pub type Overrides = BTreeMap<String, f64>;

/// Ordered snapshot of a model's parameter values
pub type ParameterSnapshot = Vec<(&'static str, f64)>;

/// Declared parameter set of a model
///
/// `set` dispatches on the key with an exhaustive match so that the accepted
/// key set is fixed per model at compile time.
pub trait ModelParameters: Default + Clone {
    /// Parameter names in declaration order
    const NAMES: &'static [&'static str];

    /// Read a parameter by name
    fn get(&self, key: &str) -> Option<f64>;

    /// Write a parameter by name, returning false if the key is not a parameter
    fn set(&mut self, key: &str, value: f64) -> bool;

    /// Model-specific value checks
    fn validate(&self) -> core::result::Result<(), (&'static str, &'static str)> {
        Ok(())
    }

    fn parameter_count() -> usize {
        Self::NAMES.len()
    }

    /// Values in declaration order
    fn snapshot(&self) -> ParameterSnapshot {
        Self::NAMES
            .iter()
            .map(|name| (*name, self.get(name).unwrap_or(f64::NAN)))
            .collect()
    }
}

/// Apply overrides to a parameter set and a state map
///
/// Parameter keys win over state keys of the same name.
pub fn apply_overrides<P: ModelParameters>(
    model: &'static str,
    params: &mut P,
    states: &mut StateMap,
    overrides: &Overrides,
) -> Result<()> {
    for (key, &value) in overrides {
        if params.set(key, value) {
            continue;
        }
        match states.index_of(key) {
            Some(index) => {
                tracing::trace!(target: "compbrain-neural", model, key = %key, value, "seeding initial state");
                states.seed(index, value)
            }
            None => {
                return Err(ModelError::UnrecognizedArgument {
                    model,
                    key: key.clone(),
                })
            }
        }
    }

    params
        .validate()
        .map_err(|(key, reason)| ModelError::InvalidParameter { model, key, reason })
}
