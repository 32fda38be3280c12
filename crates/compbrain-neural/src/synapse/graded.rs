// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Graded-Conductance Synapse
//!
//! Purely algebraic synapse: the conductance is a saturating power function of
//! presynaptic voltage above threshold.
//!
//! ```text
//! g     = min(g_sat, k · max(V_pre·t_delay - V_th, 0)^n)
//! I_syn = scale · g · (V_post - V_rev)
//! ```
//!
//! No differential state is kept; each step appends one `I_syn` value.

use super::endpoint::Endpoint;
use crate::models::{Component, SynapseModel};
use crate::types::{apply_overrides, ModelParameters, Overrides, ParameterSnapshot, Result, StateMap};

// Trace order: I_ext, I_syn
const I_SYN: usize = 1;

model_parameters! {
    /// Graded synapse parameters
    pub struct GradedSynapseParameters {
        /// Saturating conductance
        g_sat: "g_sat" = 0.05,
        /// Conductance gain
        k: "k" = 0.05,
        /// Exponent applied to the suprathreshold voltage
        n: "n" = 1.0,
        /// Scalar applied to presynaptic voltage before thresholding
        t_delay: "t_delay" = 1.0,
        v_th: "V_th" = -50.5,
        v_rev: "V_rev" = -70.0,
        /// Output current scale
        scale: "scale" = 2.0,
    }
    validate(p) {
        if p.g_sat < 0.0 {
            return Err(("g_sat", "saturating conductance must be non-negative"));
        }
        Ok(())
    }
}

impl GradedSynapseParameters {
    /// Conductance for a presynaptic voltage
    #[inline]
    pub fn conductance(&self, v_pre: f64) -> f64 {
        let drive = (v_pre * self.t_delay - self.v_th).max(0.0);
        self.g_sat.min(self.k * drive.powf(self.n))
    }

    /// Synaptic current for a presynaptic / postsynaptic voltage pair
    #[inline]
    pub fn current(&self, v_pre: f64, v_post: f64) -> f64 {
        self.scale * self.conductance(v_pre) * (v_post - self.v_rev)
    }
}

/// Graded-conductance synapse between two neurons
#[derive(Debug, Clone)]
pub struct GradedSynapse {
    name: String,
    presynaptic: Endpoint,
    postsynaptic: Endpoint,
    params: GradedSynapseParameters,
    states: StateMap,
}

impl GradedSynapse {
    pub const MODEL_NAME: &'static str = "CustomSynapse";

    pub fn new(
        name: impl Into<String>,
        presynaptic: impl Into<Endpoint>,
        postsynaptic: impl Into<Endpoint>,
    ) -> Self {
        Self {
            name: name.into(),
            presynaptic: presynaptic.into(),
            postsynaptic: postsynaptic.into(),
            params: GradedSynapseParameters::default(),
            states: StateMap::new().with_empty("I_ext").with_empty("I_syn"),
        }
    }

    pub fn with_overrides(
        name: impl Into<String>,
        presynaptic: impl Into<Endpoint>,
        postsynaptic: impl Into<Endpoint>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let mut synapse = Self::new(name, presynaptic, postsynaptic);
        apply_overrides(
            Self::MODEL_NAME,
            &mut synapse.params,
            &mut synapse.states,
            overrides,
        )?;
        Ok(synapse)
    }

    pub fn params(&self) -> &GradedSynapseParameters {
        &self.params
    }
}

impl Component for GradedSynapse {
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

impl SynapseModel for GradedSynapse {
    fn presynaptic(&self) -> &Endpoint {
        &self.presynaptic
    }

    fn postsynaptic(&self) -> &Endpoint {
        &self.postsynaptic
    }

    fn compute(&mut self, v_pre: f64, v_post: f64) -> Result<&StateMap> {
        let i_syn = self.params.current(v_pre, v_post);
        self.states.push(I_SYN, i_syn);
        Ok(&self.states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_gives_zero_conductance() {
        let params = GradedSynapseParameters::default();
        assert_eq!(params.conductance(-60.0), 0.0);
        assert_eq!(params.current(-60.0, -40.0), 0.0);
    }

    #[test]
    fn test_conductance_saturates() {
        let params = GradedSynapseParameters::default();
        // k·(V_pre - V_th) = 0.05·0.5 = 0.025 < g_sat
        assert!((params.conductance(-50.0) - 0.025).abs() < 1e-12);
        // far above threshold the conductance is capped at g_sat
        assert_eq!(params.conductance(0.0), 0.05);
    }

    #[test]
    fn test_compute_appends_synaptic_current_only() {
        let mut synapse = GradedSynapse::new("s", "n1", "n2");
        synapse.compute(0.0, -40.0).unwrap();
        synapse.compute(0.0, -40.0).unwrap();

        let expected = 2.0 * 0.05 * (-40.0 - -70.0);
        assert_eq!(synapse.states().get("I_syn").unwrap(), &[expected, expected]);
        assert!(synapse.states().get("I_ext").unwrap().is_empty());
        assert_eq!(synapse.synaptic_current(), expected);
        assert_eq!(synapse.injected_current(), 0.0);
    }

    #[test]
    fn test_reset_clears_unseeded_traces() {
        let mut synapse = GradedSynapse::new("s", "n1", "n2");
        synapse.compute(-40.0, -40.0).unwrap();
        synapse.reset();
        assert!(synapse.states().get("I_syn").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_override_rejected() {
        let overrides: Overrides = [("tau".to_string(), 1.0)].into_iter().collect();
        assert!(GradedSynapse::with_overrides("s", "n1", "n2", &overrides).is_err());
    }
}
