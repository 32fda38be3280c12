// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Circuit construction and execution errors

use core::fmt;

use compbrain_neural::ModelError;

/// Which side of a synapse an endpoint sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Presynaptic,
    Postsynaptic,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Presynaptic => f.write_str("presynaptic"),
            EndpointRole::Postsynaptic => f.write_str("postsynaptic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CircuitError {
    /// Two components share a name
    #[error("duplicate component name `{name}`")]
    DuplicateName { name: String },

    /// Synapse endpoint does not name a neuron in the circuit
    #[error("synapse `{synapse}`: {role} endpoint `{endpoint}` is not a neuron in this circuit")]
    UnknownEndpoint {
        synapse: String,
        role: EndpointRole,
        endpoint: String,
    },

    /// `execute_circuit` needs two samples to derive the step size
    #[error("time axis needs at least 2 samples, got {samples}")]
    InsufficientTimeSamples { samples: usize },

    /// A component failed during `compute`; the run is aborted
    #[error("component `{name}` failed: {source}")]
    Component {
        name: String,
        #[source]
        source: ModelError,
    },
}

impl CircuitError {
    pub(crate) fn component(name: &str, source: ModelError) -> Self {
        CircuitError::Component {
            name: name.to_string(),
            source,
        }
    }
}

pub type Result<T> = core::result::Result<T, CircuitError>;
