// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines the structs a circuit document maps to:
//!
//! ```toml
//! [times]
//! dt = 1e-4
//! steps = 10000
//!
//! [neurons.MorrisLecar.n1]
//! V = -40.0
//!
//! [synapses.InjectCurrent.s1]
//! presynaptic = "None"
//! postsynaptic = "n1"
//! type = "step"
//! intensity = 5.0
//!
//! [synapses.CustomSynapse.s2]
//! presynaptic = "n1"
//! postsynaptic = "n2"
//! params = { g_sat = 0.1 }
//! ```

use compbrain_neural::Overrides;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::{ConfigError, ConfigResult};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitConfig {
    pub times: TimesConfig,
    /// Neuron instances in document order
    pub neurons: Vec<NeuronSpec>,
    /// Synapse instances in document order
    pub synapses: Vec<SynapseSpec>,
}

/// Time axis configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimesConfig {
    /// Sample spacing in seconds
    pub dt: f64,
    /// Number of samples
    pub steps: usize,
}

impl Default for TimesConfig {
    fn default() -> Self {
        Self {
            dt: 1e-4,
            steps: 10_000,
        }
    }
}

impl TimesConfig {
    /// Uniform time axis `0, dt, 2·dt, ...` with exactly `steps` samples
    pub fn time_axis(&self) -> Array1<f64> {
        let dt = self.dt;
        Array1::from_shape_fn(self.steps, |i| i as f64 * dt)
    }

    /// Simulated duration in seconds
    pub fn duration(&self) -> f64 {
        self.dt * self.steps as f64
    }
}

/// One neuron instance
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronSpec {
    /// Model name as written in the document
    pub model: String,
    pub name: String,
    /// Parameter and initial-state overrides
    pub overrides: Overrides,
}

/// One synapse instance
#[derive(Debug, Clone, PartialEq)]
pub struct SynapseSpec {
    pub model: String,
    pub name: String,
    pub presynaptic: String,
    pub postsynaptic: String,
    /// Parameter and initial-state overrides
    pub params: Overrides,
    /// Stimulus kind for injection sources
    pub stimulus: Option<String>,
    /// Stimulus amplitude for injection sources
    pub intensity: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SynapseInstance {
    presynaptic: String,
    postsynaptic: String,
    #[serde(default)]
    params: Overrides,
    #[serde(rename = "type")]
    stimulus: Option<String>,
    intensity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCircuitConfig {
    #[serde(default)]
    times: TimesConfig,
    neurons: Option<Table>,
    synapses: Option<Table>,
}

impl CircuitConfig {
    /// Parse a circuit document
    ///
    /// # Errors
    ///
    /// `ParseError` for malformed TOML or instance tables, `MissingRequired`
    /// when the `neurons` or `synapses` section is absent.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let raw: RawCircuitConfig = toml::from_str(content)?;

        let neurons = raw
            .neurons
            .ok_or_else(|| ConfigError::MissingRequired("no neuron defined in the config file".into()))?;
        let synapses = raw
            .synapses
            .ok_or_else(|| ConfigError::MissingRequired("no synapse defined in the config file".into()))?;

        Ok(Self {
            times: raw.times,
            neurons: parse_neurons(neurons)?,
            synapses: parse_synapses(synapses)?,
        })
    }

    /// Names of every instance, neurons first
    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.neurons
            .iter()
            .map(|n| n.name.as_str())
            .chain(self.synapses.iter().map(|s| s.name.as_str()))
    }
}

fn model_instances(section: &str, model: String, value: Value) -> ConfigResult<(String, Table)> {
    match value {
        Value::Table(instances) => Ok((model, instances)),
        other => Err(ConfigError::ParseError(format!(
            "{section}.{model}: expected a table of instances, found {}",
            other.type_str()
        ))),
    }
}

fn parse_neurons(section: Table) -> ConfigResult<Vec<NeuronSpec>> {
    let mut neurons = Vec::new();
    for (model, value) in section {
        let (model, instances) = model_instances("neurons", model, value)?;
        for (name, value) in instances {
            let overrides: Overrides = value.try_into().map_err(|e: toml::de::Error| {
                ConfigError::ParseError(format!("neurons.{model}.{name}: {}", e.message()))
            })?;
            neurons.push(NeuronSpec {
                model: model.clone(),
                name,
                overrides,
            });
        }
    }
    Ok(neurons)
}

fn parse_synapses(section: Table) -> ConfigResult<Vec<SynapseSpec>> {
    let mut synapses = Vec::new();
    for (model, value) in section {
        let (model, instances) = model_instances("synapses", model, value)?;
        for (name, value) in instances {
            let instance: SynapseInstance = value.try_into().map_err(|e: toml::de::Error| {
                ConfigError::ParseError(format!("synapses.{model}.{name}: {}", e.message()))
            })?;
            synapses.push(SynapseSpec {
                model: model.clone(),
                name,
                presynaptic: instance.presynaptic,
                postsynaptic: instance.postsynaptic,
                params: instance.params,
                stimulus: instance.stimulus,
                intensity: instance.intensity,
            });
        }
    }
    Ok(synapses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
[times]
dt = 1e-3
steps = 50

[neurons.MorrisLecar.n2]
V = -40

[neurons.MorrisLecar.n1]

[neurons.HodgkinHuxley.h1]
g_Na = 100.0

[synapses.InjectCurrent.s1]
presynaptic = "None"
postsynaptic = "n1"
type = "step"

[synapses.CustomSynapse.s2]
presynaptic = "n1"
postsynaptic = "n2"
params = { g_sat = 0.1 }
"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let config = CircuitConfig::from_toml_str(DOCUMENT).unwrap();

        assert_eq!(config.times, TimesConfig { dt: 1e-3, steps: 50 });
        let names: Vec<&str> = config.instance_names().collect();
        assert_eq!(names, vec!["n2", "n1", "h1", "s1", "s2"]);

        assert_eq!(config.neurons[0].overrides.get("V"), Some(&-40.0));
        assert!(config.neurons[1].overrides.is_empty());
        assert_eq!(config.neurons[2].model, "HodgkinHuxley");

        assert_eq!(config.synapses[0].stimulus.as_deref(), Some("step"));
        assert_eq!(config.synapses[0].intensity, None);
        assert_eq!(config.synapses[1].params.get("g_sat"), Some(&0.1));
    }

    #[test]
    fn test_times_default_when_absent() {
        let config = CircuitConfig::from_toml_str(
            "[neurons.MorrisLecar.n1]\n[synapses.InjectCurrent.s1]\npresynaptic = \"None\"\npostsynaptic = \"n1\"\n",
        )
        .unwrap();
        assert_eq!(config.times, TimesConfig::default());
    }

    #[test]
    fn test_missing_sections() {
        let err = CircuitConfig::from_toml_str("[synapses]\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));

        let err = CircuitConfig::from_toml_str("[neurons]\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_synapse_requires_endpoints() {
        let err = CircuitConfig::from_toml_str(
            "[neurons]\n[synapses.CustomSynapse.s1]\npresynaptic = \"n1\"\n",
        )
        .unwrap_err();
        match err {
            ConfigError::ParseError(message) => {
                assert!(message.contains("synapses.CustomSynapse.s1"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_time_axis_has_exact_sample_count() {
        let t = TimesConfig::default().time_axis();
        assert_eq!(t.len(), 10_000);
        assert_eq!(t[0], 0.0);
        assert!((t[1] - t[0] - 1e-4).abs() < 1e-15);
        assert!((TimesConfig::default().duration() - 1.0).abs() < 1e-12);
    }
}
