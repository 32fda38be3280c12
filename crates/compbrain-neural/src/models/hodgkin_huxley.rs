// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hodgkin-Huxley Neuron Model
//!
//! ```text
//! dV = (offset + I_ext - I_syn - g_K·n⁴·(V - E_K) - g_Na·m³·h·(V - E_Na) - g_L·(V - E_L)) / C
//! dn = α_n(V)·(1 - n) - β_n(V)·n
//! dm = α_m(V)·(1 - m) - β_m(V)·m
//! dh = α_h(V)·(1 - h) - β_h(V)·h
//! ```
//!
//! Rate functions use the classic squid-axon forms with voltage measured
//! relative to rest; they are singular at V = 10 (n) and V = 25 (m).

use super::traits::{Component, NeuronModel};
use crate::types::{apply_overrides, ModelParameters, Overrides, ParameterSnapshot, Result, StateMap};

const V: usize = 0;
const GATE_N: usize = 1;
const GATE_M: usize = 2;
const GATE_H: usize = 3;

model_parameters! {
    /// Hodgkin-Huxley model-specific parameters
    pub struct HodgkinHuxleyParameters {
        g_na: "g_Na" = 120.0,
        g_k: "g_K" = 36.0,
        g_l: "g_L" = 0.3,
        e_na: "E_Na" = 50.0,
        e_k: "E_K" = -77.0,
        e_l: "E_L" = -54.387,
        offset: "offset" = 0.0,
        c: "C" = 1.0,
        time_scale: "time_scale" = 1000.0,
    }
    validate(p) {
        if p.c <= 0.0 {
            return Err(("C", "membrane capacitance must be positive"));
        }
        Ok(())
    }
}

/// Hodgkin-Huxley neuron with sodium, potassium and leak currents
#[derive(Debug, Clone)]
pub struct HodgkinHuxleyNeuron {
    name: String,
    params: HodgkinHuxleyParameters,
    states: StateMap,
}

impl HodgkinHuxleyNeuron {
    pub const MODEL_NAME: &'static str = "HodgkinHuxley";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: HodgkinHuxleyParameters::default(),
            states: StateMap::new()
                .with_initial("V", -60.0)
                .with_initial("n", 0.0)
                .with_initial("m", 0.0)
                .with_initial("h", 1.0),
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

    pub fn params(&self) -> &HodgkinHuxleyParameters {
        &self.params
    }
}

impl Component for HodgkinHuxleyNeuron {
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

impl NeuronModel for HodgkinHuxleyNeuron {
    fn compute(&mut self, i_syn: f64, i_ext: f64, dt: f64) -> Result<&StateMap> {
        let v = self.states.require(V, &self.name)?;
        let n = self.states.require(GATE_N, &self.name)?;
        let m = self.states.require(GATE_M, &self.name)?;
        let h = self.states.require(GATE_H, &self.name)?;

        let p = &self.params;
        let dt = dt * p.time_scale;

        let dv = (p.offset + i_ext
            - i_syn
            - p.g_k * n.powi(4) * (v - p.e_k)
            - p.g_na * m.powi(3) * h * (v - p.e_na)
            - p.g_l * (v - p.e_l))
            / p.c;

        let dn = (0.01 * (10.0 - v) / ((1.0 - v / 10.0).exp() - 1.0)) * (1.0 - n)
            - 0.125 * (-v / 80.0).exp() * n;
        let dm = ((2.5 - 0.1 * v) / ((2.5 - v / 10.0).exp() - 1.0)) * (1.0 - m)
            - 4.0 * (-v / 18.0).exp() * m;
        let dh = 0.07 * (-v / 20.0).exp() * (1.0 - h) - h / (1.0 + (3.0 - v / 10.0).exp());

        self.states.push(V, v + dv * dt);
        self.states.push(GATE_N, n + dn * dt);
        self.states.push(GATE_M, m + dm * dt);
        self.states.push(GATE_H, h + dh * dt);
        Ok(&self.states)
    }
}
