//! Configuration validation
//!
//! This module checks that a parsed circuit document describes a runnable
//! simulation before any component is built.

use std::collections::HashSet;

use crate::{CircuitConfig, ConfigError, ConfigResult};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
    DuplicateName { name: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::DuplicateName { name } => {
                write!(f, "Instance name '{}' is used more than once", name)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - A positive, finite sample spacing
/// - At least two samples (the driver derives dt from the first two)
/// - Instance names unique across every neuron and synapse model
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &CircuitConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Every validation problem, in check order
pub fn collect_errors(config: &CircuitConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_times(config, &mut errors);
    validate_unique_names(config, &mut errors);
    errors
}

fn validate_times(config: &CircuitConfig, errors: &mut Vec<ConfigValidationError>) {
    let dt = config.times.dt;
    if !dt.is_finite() || dt <= 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "times.dt".to_string(),
            reason: format!("must be a finite value > 0 (got {})", dt),
        });
    }

    if config.times.steps < 2 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "times.steps".to_string(),
            reason: format!("must be at least 2 (got {})", config.times.steps),
        });
    }
}

fn validate_unique_names(config: &CircuitConfig, errors: &mut Vec<ConfigValidationError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in config.instance_names() {
        if !seen.insert(name) && reported.insert(name) {
            errors.push(ConfigValidationError::DuplicateName {
                name: name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NeuronSpec, TimesConfig};
    use compbrain_neural::Overrides;

    fn neuron(model: &str, name: &str) -> NeuronSpec {
        NeuronSpec {
            model: model.to_string(),
            name: name.to_string(),
            overrides: Overrides::new(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CircuitConfig::default()).is_ok());
    }

    #[test]
    fn test_all_problems_reported_together() {
        let config = CircuitConfig {
            times: TimesConfig { dt: 0.0, steps: 1 },
            neurons: vec![
                neuron("MorrisLecar", "n1"),
                neuron("HodgkinHuxley", "n1"),
                neuron("MorrisLecar", "n1"),
            ],
            synapses: vec![],
        };

        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors[2],
            ConfigValidationError::DuplicateName {
                name: "n1".to_string()
            }
        );

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("times.dt"));
        assert!(message.contains("times.steps"));
        assert!(message.contains("'n1'"));
    }

    #[test]
    fn test_nan_dt_rejected() {
        let config = CircuitConfig {
            times: TimesConfig {
                dt: f64::NAN,
                steps: 10,
            },
            ..CircuitConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
