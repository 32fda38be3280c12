// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Integrate-and-Fire Neuron Model
//!
//! ```text
//! V(t+1) = V(t) + (I_ext / C)·dt
//! if V(t+1) ≥ V_T:
//!     V(t+1) = V_0    when V(t+1) ≥ V_imp   (impulse already emitted: reset)
//!     V(t+1) = V_imp  otherwise              (emit impulse)
//! ```
//!
//! Only injected current drives this model; synaptic current is not integrated.

use super::traits::{Component, NeuronModel};
use crate::types::{apply_overrides, ModelParameters, Overrides, ParameterSnapshot, Result, StateMap};

const V: usize = 0;

model_parameters! {
    /// Integrate-and-fire model-specific parameters
    pub struct IntegrateAndFireParameters {
        /// Firing threshold
        v_t: "V_T" = -50.0,
        /// Reset potential
        v_0: "V_0" = -80.0,
        /// Impulse peak
        v_imp: "V_imp" = -20.0,
        c: "C" = 1.0,
        time_scale: "time_scale" = 1000.0,
        /// Nominal step the model was tuned for; `compute` uses the caller's dt
        dt: "dt" = 1e-5,
    }
    validate(p) {
        if p.c <= 0.0 {
            return Err(("C", "membrane capacitance must be positive"));
        }
        Ok(())
    }
}

/// Integrate-and-fire neuron
#[derive(Debug, Clone)]
pub struct IntegrateAndFireNeuron {
    name: String,
    params: IntegrateAndFireParameters,
    states: StateMap,
}

impl IntegrateAndFireNeuron {
    pub const MODEL_NAME: &'static str = "IntegrateAndFire";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: IntegrateAndFireParameters::default(),
            states: StateMap::new().with_initial("V", -80.0),
        }
    }

    pub fn with_overrides(name: impl Into<String>, overrides: &Overrides) -> Result<Self> {
        let mut neuron = Self::new(name);
        apply_overrides(
            Self::MODEL_NAME,
            &mut neuron.params,
            &mut neuron.states,
            overrides,
        )?;
        Ok(neuron)
    }

    pub fn params(&self) -> &IntegrateAndFireParameters {
        &self.params
    }
}

impl Component for IntegrateAndFireNeuron {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    fn parameters(&self) -> ParameterSnapshot {
        self.params.snapshot()
    }

    fn states(&self) -> &StateMap {
        &self.states
    }

    fn reset(&mut self) {
        self.states.reset();
    }
}

impl NeuronModel for IntegrateAndFireNeuron {
    fn compute(&mut self, _i_syn: f64, i_ext: f64, dt: f64) -> Result<&StateMap> {
        let v = self.states.require(V, &self.name)?;
        let p = &self.params;
        let dt = dt * p.time_scale;

        let mut next = v + (i_ext / p.c) * dt;
        if next >= p.v_t {
            next = if next >= p.v_imp { p.v_0 } else { p.v_imp };
        }

        self.states.push(V, next);
        Ok(&self.states)
    }
}
