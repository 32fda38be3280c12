// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Model-name dispatch from configuration instances to components
//!
//! Model names resolve through the closed `NeuronKind` / `SynapseKind`
//! tables; an unknown name is a configuration error.

use compbrain_neural::{
    GradedSynapse, InjectCurrent, InjectCurrentOptions, ModelError, Neuron, NeuronKind,
    StimulusKind, Synapse, SynapseKind,
};
use tracing::debug;

use crate::{CircuitConfig, ConfigError, ConfigResult, NeuronSpec, SynapseSpec};

/// Ordered component lists ready to be wired into a circuit
#[derive(Debug, Clone)]
pub struct CircuitComponents {
    pub neurons: Vec<Neuron>,
    pub synapses: Vec<Synapse>,
}

impl CircuitConfig {
    /// Construct every configured component, in document order
    ///
    /// Injection sources are sized to `times.steps` samples.
    pub fn build_components(&self) -> ConfigResult<CircuitComponents> {
        let neurons = self
            .neurons
            .iter()
            .map(build_neuron)
            .collect::<ConfigResult<Vec<_>>>()?;
        let synapses = self
            .synapses
            .iter()
            .map(|spec| build_synapse(spec, self.times.steps))
            .collect::<ConfigResult<Vec<_>>>()?;

        debug!(
            target: "compbrain-config",
            "Built {} neurons and {} synapses",
            neurons.len(),
            synapses.len()
        );
        Ok(CircuitComponents { neurons, synapses })
    }
}

fn model_error(instance: &str) -> impl FnOnce(ModelError) -> ConfigError + '_ {
    move |source| ConfigError::Model {
        instance: instance.to_string(),
        source,
    }
}

/// Construct one neuron
pub fn build_neuron(spec: &NeuronSpec) -> ConfigResult<Neuron> {
    let kind = NeuronKind::from_model_name(&spec.model).ok_or_else(|| ConfigError::UnknownModel {
        kind: "neuron",
        name: spec.model.clone(),
    })?;
    kind.build(spec.name.as_str(), &spec.overrides)
        .map_err(model_error(&spec.name))
}

/// Construct one synapse; `samples` sizes generated stimulus waveforms
pub fn build_synapse(spec: &SynapseSpec, samples: usize) -> ConfigResult<Synapse> {
    let kind = SynapseKind::from_model_name(&spec.model).ok_or_else(|| ConfigError::UnknownModel {
        kind: "synapse",
        name: spec.model.clone(),
    })?;

    match kind {
        SynapseKind::Graded => {
            if let Some(key) = stimulus_key(spec) {
                return Err(model_error(&spec.name)(ModelError::UnrecognizedArgument {
                    model: GradedSynapse::MODEL_NAME,
                    key: key.to_string(),
                }));
            }
            let synapse = GradedSynapse::with_overrides(
                spec.name.as_str(),
                spec.presynaptic.as_str(),
                spec.postsynaptic.as_str(),
                &spec.params,
            )
            .map_err(model_error(&spec.name))?;
            Ok(synapse.into())
        }
        SynapseKind::InjectCurrent => {
            if let Some(key) = spec.params.keys().next() {
                return Err(model_error(&spec.name)(ModelError::UnrecognizedArgument {
                    model: InjectCurrent::MODEL_NAME,
                    key: key.clone(),
                }));
            }
            let stimulus = match &spec.stimulus {
                Some(name) => StimulusKind::from_name(name).map_err(model_error(&spec.name))?,
                None => StimulusKind::default(),
            };
            let defaults = InjectCurrentOptions::default();
            let options = InjectCurrentOptions {
                stimulus,
                intensity: spec.intensity.unwrap_or(defaults.intensity),
                samples,
                ..defaults
            };
            Ok(InjectCurrent::with_options(
                spec.name.as_str(),
                spec.presynaptic.as_str(),
                spec.postsynaptic.as_str(),
                options,
            )
            .into())
        }
    }
}

fn stimulus_key(spec: &SynapseSpec) -> Option<&'static str> {
    if spec.stimulus.is_some() {
        Some("type")
    } else if spec.intensity.is_some() {
        Some("intensity")
    } else {
        None
    }
}
