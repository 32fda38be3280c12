// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synapse Models
//!
//! Synapses carry current from their presynaptic side to their postsynaptic
//! neuron. Two flavours ship with the crate:
//! - `GradedSynapse`: conductance driven by presynaptic voltage (`I_syn`)
//! - `InjectCurrent`: external stimulus replayed from a waveform (`I_ext`)
//!
//! A circuit holds them as the closed `Synapse` enum.

pub mod endpoint;
pub mod graded;
pub mod inject_current;

pub use endpoint::{Endpoint, UNCONNECTED};
pub use graded::{GradedSynapse, GradedSynapseParameters};
pub use inject_current::{InjectCurrent, InjectCurrentOptions, StimulusKind};

use crate::models::{Component, SynapseModel};
use crate::types::{ParameterSnapshot, Result, StateMap};

/// Bundled synapse model identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynapseKind {
    Graded,
    InjectCurrent,
}

impl SynapseKind {
    pub const ALL: [SynapseKind; 2] = [SynapseKind::Graded, SynapseKind::InjectCurrent];

    /// Resolve a configuration model name
    pub fn from_model_name(name: &str) -> Option<Self> {
        match name {
            "CustomSynapse" | "Graded" => Some(Self::Graded),
            "InjectCurrent" => Some(Self::InjectCurrent),
            _ => None,
        }
    }

    pub fn model_name(self) -> &'static str {
        match self {
            Self::Graded => GradedSynapse::MODEL_NAME,
            Self::InjectCurrent => InjectCurrent::MODEL_NAME,
        }
    }
}

/// Any bundled synapse model
#[derive(Debug, Clone)]
pub enum Synapse {
    Graded(GradedSynapse),
    InjectCurrent(InjectCurrent),
}

macro_rules! dispatch_synapse {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Synapse::Graded($inner) => $body,
            Synapse::InjectCurrent($inner) => $body,
        }
    };
}

impl Synapse {
    pub fn kind(&self) -> SynapseKind {
        match self {
            Synapse::Graded(_) => SynapseKind::Graded,
            Synapse::InjectCurrent(_) => SynapseKind::InjectCurrent,
        }
    }
}

impl Component for Synapse {
    fn name(&self) -> &str {
        dispatch_synapse!(self, s => s.name())
    }

    fn model_name(&self) -> &'static str {
        dispatch_synapse!(self, s => s.model_name())
    }

    fn parameters(&self) -> ParameterSnapshot {
        dispatch_synapse!(self, s => s.parameters())
    }

    fn states(&self) -> &StateMap {
        dispatch_synapse!(self, s => s.states())
    }

    fn reset(&mut self) {
        dispatch_synapse!(self, s => s.reset())
    }
}

impl SynapseModel for Synapse {
    fn presynaptic(&self) -> &Endpoint {
        dispatch_synapse!(self, s => s.presynaptic())
    }

    fn postsynaptic(&self) -> &Endpoint {
        dispatch_synapse!(self, s => s.postsynaptic())
    }

    fn reads_voltage(&self) -> bool {
        dispatch_synapse!(self, s => s.reads_voltage())
    }

    #[inline]
    fn compute(&mut self, v_pre: f64, v_post: f64) -> Result<&StateMap> {
        dispatch_synapse!(self, s => s.compute(v_pre, v_post))
    }
}

impl From<GradedSynapse> for Synapse {
    fn from(synapse: GradedSynapse) -> Self {
        Synapse::Graded(synapse)
    }
}

impl From<InjectCurrent> for Synapse {
    fn from(source: InjectCurrent) -> Self {
        Synapse::InjectCurrent(source)
    }
}
