// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Component Contract
//!
//! Every neuron and synapse model is a named component that owns its parameters
//! and state traces. A circuit never writes component state directly; it only
//! reads the accessors below and calls `compute`.

use crate::synapse::Endpoint;
use crate::types::{ModelError, ParameterSnapshot, Result, StateMap};

/// Membrane voltage trace name
pub const VOLTAGE: &str = "V";
/// Synaptic current trace name
pub const SYNAPTIC_CURRENT: &str = "I_syn";
/// Injected current trace name
pub const INJECTED_CURRENT: &str = "I_ext";

/// Capabilities shared by every neuron and synapse model
pub trait Component {
    /// Instance name, unique within a circuit
    fn name(&self) -> &str;

    /// Canonical model name used by configuration documents
    fn model_name(&self) -> &'static str;

    /// Current parameter values in declaration order
    fn parameters(&self) -> ParameterSnapshot;

    /// Recorded state traces
    fn states(&self) -> &StateMap;

    /// Truncate every trace back to its initial entry
    fn reset(&mut self);
}

/// Neuron update contract
pub trait NeuronModel: Component {
    /// Advance one explicit Euler step
    ///
    /// `dt` is in the caller's time unit (seconds); each model rescales it by its
    /// `time_scale` parameter.
    fn compute(&mut self, i_syn: f64, i_ext: f64, dt: f64) -> Result<&StateMap>;

    /// Most recent membrane voltage
    fn voltage(&self) -> Result<f64> {
        self.states()
            .last(VOLTAGE)
            .ok_or_else(|| ModelError::EmptyState {
                component: self.name().to_string(),
                state: VOLTAGE,
            })
    }
}

/// Synapse update contract
pub trait SynapseModel: Component {
    fn presynaptic(&self) -> &Endpoint;

    fn postsynaptic(&self) -> &Endpoint;

    /// Whether `compute` consumes endpoint voltages
    fn reads_voltage(&self) -> bool {
        true
    }

    /// Advance one step from summed pre- and postsynaptic voltages
    fn compute(&mut self, v_pre: f64, v_post: f64) -> Result<&StateMap>;

    /// Most recent synaptic current, 0 before the first step
    fn synaptic_current(&self) -> f64 {
        self.states().last_or_zero(SYNAPTIC_CURRENT)
    }

    /// Most recent injected current, 0 before the first step
    fn injected_current(&self) -> f64 {
        self.states().last_or_zero(INJECTED_CURRENT)
    }
}
