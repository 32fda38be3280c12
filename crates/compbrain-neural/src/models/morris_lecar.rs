// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Morris-Lecar Neuron Model
//!
//! Two-variable conductance model: membrane voltage `V` and potassium gating
//! variable `N`.
//!
//! ## Model Dynamics
//!
//! ```text
//! dV = (I_ext + offset - I_syn - g_L·(V - E_L)
//!       - 0.5·g_Ca·(1 + tanh((V - V_1)/V_2))·(V - E_Ca)
//!       - g_K·N·(V - E_K)) / C
//! dN = (0.5·(1 + tanh((V - V_3)/V_4)) - N) · phi·cosh((V - V_3)/(2·V_4))
//!
//! V(t+1) = V(t) + dV·dt·time_scale
//! N(t+1) = N(t) + dN·dt·time_scale
//! ```
//!
//! `N` is clamped into `[0, 1]` (values below 1e-7 snap to 0) before it is used.

use super::traits::{Component, NeuronModel};
use crate::types::{apply_overrides, ModelParameters, Overrides, ParameterSnapshot, Result, StateMap};

const V: usize = 0;
const N: usize = 1;

/// Gating values below this snap to zero
const N_FLOOR: f64 = 1e-7;

model_parameters! {
    /// Morris-Lecar model-specific parameters
    pub struct MorrisLecarParameters {
        /// Calcium half-activation voltage (mV)
        v_1: "V_1" = -15.0,
        /// Calcium activation slope (mV)
        v_2: "V_2" = 2.0,
        /// Potassium half-activation voltage (mV)
        v_3: "V_3" = -45.0,
        /// Potassium activation slope (mV)
        v_4: "V_4" = 0.8,
        /// Potassium rate scale
        phi: "phi" = 0.0005,
        /// Membrane capacitance
        c: "C" = 1.0,
        /// Constant drive added to the injected current
        offset: "offset" = 50.0,
        e_l: "E_L" = -50.0,
        e_ca: "E_Ca" = 120.0,
        e_k: "E_K" = -75.0,
        g_l: "g_L" = 0.1,
        g_ca: "g_Ca" = 2.0,
        g_k: "g_K" = 7.0,
        /// Factor converting the caller's dt into model time (s -> ms)
        time_scale: "time_scale" = 1000.0,
        /// Nominal step the model was tuned for; `compute` uses the caller's dt
        dt: "dt" = 1e-4,
    }
    validate(p) {
        if p.c <= 0.0 {
            return Err(("C", "membrane capacitance must be positive"));
        }
        if p.v_2 == 0.0 {
            return Err(("V_2", "activation slope must be non-zero"));
        }
        if p.v_4 == 0.0 {
            return Err(("V_4", "activation slope must be non-zero"));
        }
        Ok(())
    }
}

/// Morris-Lecar neuron
#[derive(Debug, Clone)]
pub struct MorrisLecarNeuron {
    name: String,
    params: MorrisLecarParameters,
    states: StateMap,
}

impl MorrisLecarNeuron {
    pub const MODEL_NAME: &'static str = "MorrisLecar";

    /// Create a neuron with default parameters and initial conditions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: MorrisLecarParameters::default(),
            states: StateMap::new().with_initial("V", -44.5).with_initial("N", 0.5),
        }
    }

    /// Create a neuron, applying parameter and initial-state overrides
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

    pub fn params(&self) -> &MorrisLecarParameters {
        &self.params
    }
}

impl Component for MorrisLecarNeuron {
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

impl NeuronModel for MorrisLecarNeuron {
    fn compute(&mut self, i_syn: f64, i_ext: f64, dt: f64) -> Result<&StateMap> {
        let v = self.states.require(V, &self.name)?;
        let mut n = self.states.require(N, &self.name)?;
        if n < N_FLOOR {
            n = 0.0;
        } else if n > 1.0 {
            n = 1.0;
        }

        let p = &self.params;
        let dt = dt * p.time_scale;

        let dv = (i_ext + p.offset
            - i_syn
            - p.g_l * (v - p.e_l)
            - 0.5 * p.g_ca * (1.0 + ((v - p.v_1) / p.v_2).tanh()) * (v - p.e_ca)
            - p.g_k * n * (v - p.e_k))
            / p.c;
        let dn = (0.5 * (1.0 + ((v - p.v_3) / p.v_4).tanh()) - n)
            * (p.phi * ((v - p.v_3) / (2.0 * p.v_4)).cosh());

        self.states.push(V, v + dv * dt);
        self.states.push(N, n + dn * dt);
        Ok(&self.states)
    }
}
