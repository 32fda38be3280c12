// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuron Model Architecture
//!
//! Neuron models implement the `NeuronModel` trait. A circuit holds them as the
//! closed `Neuron` enum so that dispatch over the bundled model set is an
//! exhaustive `match`.
//!
//! ## Adding a New Neuron Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Declare its parameters with `model_parameters!` and implement `NeuronModel`
//! 3. Add a `Neuron` and `NeuronKind` variant
//! 4. Add tests

pub mod hodgkin_huxley;
pub mod integrate_and_fire;
pub mod morris_lecar;
pub mod photo_insensitive;
pub mod traits;

pub use hodgkin_huxley::{HodgkinHuxleyNeuron, HodgkinHuxleyParameters};
pub use integrate_and_fire::{IntegrateAndFireNeuron, IntegrateAndFireParameters};
pub use morris_lecar::{MorrisLecarNeuron, MorrisLecarParameters};
pub use photo_insensitive::{PhotoInsensitiveNeuron, PhotoInsensitiveParameters};
pub use traits::{Component, NeuronModel, SynapseModel, INJECTED_CURRENT, SYNAPTIC_CURRENT, VOLTAGE};

use crate::types::{Overrides, ParameterSnapshot, Result, StateMap};

/// Bundled neuron model identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeuronKind {
    MorrisLecar,
    HodgkinHuxley,
    IntegrateAndFire,
    PhotoInsensitive,
}

impl NeuronKind {
    pub const ALL: [NeuronKind; 4] = [
        NeuronKind::MorrisLecar,
        NeuronKind::HodgkinHuxley,
        NeuronKind::IntegrateAndFire,
        NeuronKind::PhotoInsensitive,
    ];

    /// Resolve a configuration model name
    pub fn from_model_name(name: &str) -> Option<Self> {
        match name {
            "MorrisLecar" => Some(Self::MorrisLecar),
            "HodgkinHuxley" => Some(Self::HodgkinHuxley),
            "IntegrateAndFire" | "IAF" => Some(Self::IntegrateAndFire),
            "PhotoInsensitive" => Some(Self::PhotoInsensitive),
            _ => None,
        }
    }

    pub fn model_name(self) -> &'static str {
        match self {
            Self::MorrisLecar => MorrisLecarNeuron::MODEL_NAME,
            Self::HodgkinHuxley => HodgkinHuxleyNeuron::MODEL_NAME,
            Self::IntegrateAndFire => IntegrateAndFireNeuron::MODEL_NAME,
            Self::PhotoInsensitive => PhotoInsensitiveNeuron::MODEL_NAME,
        }
    }

    /// Construct an instance of this model
    pub fn build(self, name: impl Into<String>, overrides: &Overrides) -> Result<Neuron> {
        Ok(match self {
            Self::MorrisLecar => MorrisLecarNeuron::with_overrides(name, overrides)?.into(),
            Self::HodgkinHuxley => HodgkinHuxleyNeuron::with_overrides(name, overrides)?.into(),
            Self::IntegrateAndFire => {
                IntegrateAndFireNeuron::with_overrides(name, overrides)?.into()
            }
            Self::PhotoInsensitive => {
                PhotoInsensitiveNeuron::with_overrides(name, overrides)?.into()
            }
        })
    }
}

/// Any bundled neuron model
#[derive(Debug, Clone)]
pub enum Neuron {
    MorrisLecar(MorrisLecarNeuron),
    HodgkinHuxley(HodgkinHuxleyNeuron),
    IntegrateAndFire(IntegrateAndFireNeuron),
    PhotoInsensitive(PhotoInsensitiveNeuron),
}

macro_rules! dispatch_neuron {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Neuron::MorrisLecar($inner) => $body,
            Neuron::HodgkinHuxley($inner) => $body,
            Neuron::IntegrateAndFire($inner) => $body,
            Neuron::PhotoInsensitive($inner) => $body,
        }
    };
}

impl Neuron {
    pub fn kind(&self) -> NeuronKind {
        match self {
            Neuron::MorrisLecar(_) => NeuronKind::MorrisLecar,
            Neuron::HodgkinHuxley(_) => NeuronKind::HodgkinHuxley,
            Neuron::IntegrateAndFire(_) => NeuronKind::IntegrateAndFire,
            Neuron::PhotoInsensitive(_) => NeuronKind::PhotoInsensitive,
        }
    }
}

impl Component for Neuron {
    fn name(&self) -> &str {
        dispatch_neuron!(self, n => n.name())
    }

    fn model_name(&self) -> &'static str {
        dispatch_neuron!(self, n => n.model_name())
    }

    fn parameters(&self) -> ParameterSnapshot {
        dispatch_neuron!(self, n => n.parameters())
    }

    fn states(&self) -> &StateMap {
        dispatch_neuron!(self, n => n.states())
    }

    fn reset(&mut self) {
        dispatch_neuron!(self, n => n.reset())
    }
}

impl NeuronModel for Neuron {
    #[inline]
    fn compute(&mut self, i_syn: f64, i_ext: f64, dt: f64) -> Result<&StateMap> {
        dispatch_neuron!(self, n => n.compute(i_syn, i_ext, dt))
    }
}

impl From<MorrisLecarNeuron> for Neuron {
    fn from(neuron: MorrisLecarNeuron) -> Self {
        Neuron::MorrisLecar(neuron)
    }
}

impl From<HodgkinHuxleyNeuron> for Neuron {
    fn from(neuron: HodgkinHuxleyNeuron) -> Self {
        Neuron::HodgkinHuxley(neuron)
    }
}

impl From<IntegrateAndFireNeuron> for Neuron {
    fn from(neuron: IntegrateAndFireNeuron) -> Self {
        Neuron::IntegrateAndFire(neuron)
    }
}

impl From<PhotoInsensitiveNeuron> for Neuron {
    fn from(neuron: PhotoInsensitiveNeuron) -> Self {
        Neuron::PhotoInsensitive(neuron)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_round_trip() {
        for kind in NeuronKind::ALL {
            assert_eq!(NeuronKind::from_model_name(kind.model_name()), Some(kind));
        }
        assert_eq!(NeuronKind::from_model_name("IAF"), Some(NeuronKind::IntegrateAndFire));
        assert_eq!(NeuronKind::from_model_name("Izhikevich"), None);
    }

    #[test]
    fn test_build_dispatches_to_model() {
        let neuron = NeuronKind::HodgkinHuxley
            .build("hh", &Overrides::new())
            .unwrap();
        assert_eq!(neuron.kind(), NeuronKind::HodgkinHuxley);
        assert_eq!(neuron.name(), "hh");
        assert_eq!(neuron.voltage().unwrap(), -60.0);
    }

    #[test]
    fn test_every_model_exposes_voltage() {
        for kind in NeuronKind::ALL {
            let mut neuron = kind.build("n", &Overrides::new()).unwrap();
            neuron.compute(0.0, 1.0, 1e-5).unwrap();
            assert_eq!(neuron.states().get(VOLTAGE).unwrap().len(), 2);
        }
    }
}
