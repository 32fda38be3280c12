// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Photo-Insensitive Membrane Model
//!
//! Photoreceptor membrane with five voltage-gated potassium gating variables
//! (`Y2`..`Y6`: A-type activation/inactivation, delayed rectifier, novel K).
//! Each gate relaxes toward its steady state with a voltage-dependent time
//! constant. Only injected current drives the membrane.

use super::traits::{Component, NeuronModel};
use crate::types::{apply_overrides, ModelParameters, Overrides, ParameterSnapshot, Result, StateMap};

const V: usize = 0;
const Y2: usize = 1;
const Y3: usize = 2;
const Y4: usize = 3;
const Y5: usize = 4;
const Y6: usize = 5;

model_parameters! {
    /// Photo-insensitive model-specific parameters
    pub struct PhotoInsensitiveParameters {
        c: "C" = 4.0,
        e_cl: "E_Cl" = 0.0,
        e_k: "E_K" = -70.0,
        g_l: "g_L" = 0.006,
        g_k: "g_K" = 0.082,
        g_a: "g_A" = 1.6,
        g_dr: "g_dr" = 3.5,
        g_nov: "g_nov" = 3.0,
        time_scale: "time_scale" = 1000.0,
        /// Nominal step the model was tuned for; `compute` uses the caller's dt
        dt: "dt" = 1e-4,
    }
    validate(p) {
        if p.c <= 0.0 {
            return Err(("C", "membrane capacitance must be positive"));
        }
        Ok(())
    }
}

/// Photo-insensitive photoreceptor membrane
#[derive(Debug, Clone)]
pub struct PhotoInsensitiveNeuron {
    name: String,
    params: PhotoInsensitiveParameters,
    states: StateMap,
}

impl PhotoInsensitiveNeuron {
    pub const MODEL_NAME: &'static str = "PhotoInsensitive";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: PhotoInsensitiveParameters::default(),
            states: StateMap::new()
                .with_initial("V", -67.5)
                .with_initial("Y2", 0.0)
                .with_initial("Y3", 0.0)
                .with_initial("Y4", 0.0)
                .with_initial("Y5", 0.0)
                .with_initial("Y6", 0.0),
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

    pub fn params(&self) -> &PhotoInsensitiveParameters {
        &self.params
    }
}

#[inline]
fn sigmoid(offset: f64, v: f64, slope: f64) -> f64 {
    1.0 / (1.0 + ((offset - v) / slope).exp())
}

#[inline]
fn gaussian(center: f64, v: f64, width: f64) -> f64 {
    (-((center - v) / width).powi(2)).exp()
}

impl Component for PhotoInsensitiveNeuron {
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

impl NeuronModel for PhotoInsensitiveNeuron {
    fn compute(&mut self, _i_syn: f64, i_ext: f64, dt: f64) -> Result<&StateMap> {
        let v = self.states.require(V, &self.name)?;
        let y2 = self.states.require(Y2, &self.name)?;
        let y3 = self.states.require(Y3, &self.name)?;
        let y4 = self.states.require(Y4, &self.name)?;
        let y5 = self.states.require(Y5, &self.name)?;
        let y6 = self.states.require(Y6, &self.name)?;

        let p = &self.params;
        let dt = dt * p.time_scale;

        let dv = (i_ext
            - p.g_k * (v - p.e_k)
            - p.g_l * (v - p.e_cl)
            - p.g_a * y2.powi(3) * y3 * (v - p.e_k)
            - p.g_dr * y4.powi(2) * y3 * (v - p.e_k)
            - p.g_nov * y6 * (v - p.e_k))
            / p.c;

        let tau2 = 0.13 + 3.39 * gaussian(-73.0, v, 20.0);
        let tau3 = 113.0 * gaussian(-71.0, v, 29.0);
        let tau4 = 0.5 + 5.75 * gaussian(-25.0, v, 32.0);
        let tau5 = 890.0;
        let tau6 = 3.0 + 106.0 * gaussian(-20.0, v, 22.0);

        let dy2 = (sigmoid(-23.7, v, 12.8).powf(1.0 / 3.0) - y2) / tau2;
        let dy3 = ((0.9 * sigmoid(-55.0, v, -3.9) + 0.1 * sigmoid(-74.8, v, -10.7)) - y3) / tau3;
        let dy4 = (sigmoid(-1.0, v, 9.1).powf(0.5) - y4) / tau4;
        let dy5 = (sigmoid(-25.7, v, -6.4) - y5) / tau5;
        let dy6 = (sigmoid(-12.0, v, 11.0) - y6) / tau6;

        self.states.push(V, v + dv * dt);
        self.states.push(Y2, y2 + dy2 * dt);
        self.states.push(Y3, y3 + dy3 * dt);
        self.states.push(Y4, y4 + dy4 * dt);
        self.states.push(Y5, y5 + dy5 * dt);
        self.states.push(Y6, y6 + dy6 * dt);
        Ok(&self.states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates_relax_toward_steady_state() {
        let mut neuron = PhotoInsensitiveNeuron::new("pr");
        neuron.compute(0.0, 0.0, 1e-4).unwrap();
        for gate in ["Y2", "Y3", "Y4", "Y5", "Y6"] {
            let value = neuron.states().last(gate).unwrap();
            assert!(value > 0.0, "{gate} should open from zero, got {value}");
        }
    }

    #[test]
    fn test_six_traces() {
        let neuron = PhotoInsensitiveNeuron::new("pr");
        assert_eq!(neuron.states().len(), 6);
        assert_eq!(PhotoInsensitiveParameters::parameter_count(), 10);
    }
}
