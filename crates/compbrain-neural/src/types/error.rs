// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for component construction and computation

/// Errors raised by neuron and synapse models
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Override key is neither a parameter nor a state of the model
    #[error("{model}: unrecognized argument `{key}`")]
    UnrecognizedArgument { model: &'static str, key: String },

    /// Parameter value rejected by the model's validation
    #[error("{model}: invalid parameter `{key}`: {reason}")]
    InvalidParameter {
        model: &'static str,
        key: &'static str,
        reason: &'static str,
    },

    /// Stimulus kind requested for an injection source does not exist
    #[error("no {0} inject type implemented")]
    UnknownStimulus(String),

    /// A state trace that must hold a value was empty at compute time
    #[error("{component}: state `{state}` has no recorded value")]
    EmptyState {
        component: String,
        state: &'static str,
    },

    /// Injection source was stepped past the end of its waveform
    #[error("{component}: waveform exhausted at step {step} (length {len})")]
    WaveformExhausted {
        component: String,
        step: usize,
        len: usize,
    },
}

pub type Result<T> = core::result::Result<T, ModelError>;
