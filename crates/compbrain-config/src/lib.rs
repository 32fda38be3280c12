// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # compbrain Configuration System
//!
//! Declarative circuit documents for compbrain with support for:
//! - TOML file parsing, instances kept in document order
//! - Environment variable overrides
//! - CLI argument overrides
//! - Model-name dispatch into the bundled neuron and synapse models
//!
//! ## Usage
//!
//! ```rust,no_run
//! use compbrain_config::load_config;
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//! let components = config.build_components().expect("Failed to build components");
//! let t = config.times.time_axis();
//!
//! println!("{} neurons, {} samples", components.neurons.len(), t.len());
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builder;
pub mod loader;
pub mod types;
pub mod validation;

pub use builder::{build_neuron, build_synapse, CircuitComponents};
pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    CONFIG_FILE_NAME, CONFIG_PATH_ENV,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

use compbrain_neural::ModelError;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("no {name} {kind}s implemented")]
    UnknownModel { kind: &'static str, name: String },

    #[error("{instance}: {source}")]
    Model {
        instance: String,
        #[source]
        source: ModelError,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_message() {
        let err = ConfigError::UnknownModel {
            kind: "neuron",
            name: "Izhikevich".to_string(),
        };
        assert_eq!(err.to_string(), "no Izhikevich neurons implemented");
    }
}
