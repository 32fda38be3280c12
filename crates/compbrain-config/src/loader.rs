// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (circuit document)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::validation::validate_config;
use crate::{CircuitConfig, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default circuit document file name
pub const CONFIG_FILE_NAME: &str = "circuit.toml";

/// Environment variable naming an explicit circuit document
pub const CONFIG_PATH_ENV: &str = "COMPBRAIN_CONFIG_PATH";

/// Find the circuit configuration file
///
/// Search order:
/// 1. `COMPBRAIN_CONFIG_PATH` environment variable
/// 2. Current working directory: `./circuit.toml`
/// 3. Parent directories (searches up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by {} not found: {}",
                CONFIG_PATH_ENV,
                path.display()
            )));
        }
    }

    // 2. Search in common locations
    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd;
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Circuit file '{}' not found in any of these locations:\n{}\n\nSet {} environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load and validate a circuit document
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<CircuitConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config = CircuitConfig::from_toml_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;

    info!(
        target: "compbrain-config",
        "Loaded circuit from {}: {} neurons, {} synapses, dt={}, steps={}",
        config_file.display(),
        config.neurons.len(),
        config.synapses.len(),
        config.times.dt,
        config.times.steps
    );

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `COMPBRAIN_DT` -> `times.dt`
/// - `COMPBRAIN_STEPS` -> `times.steps`
///
/// Values that fail to parse are logged and ignored.
pub fn apply_environment_overrides(config: &mut CircuitConfig) {
    if let Ok(value) = env::var("COMPBRAIN_DT") {
        apply_dt(config, "COMPBRAIN_DT", &value);
    }
    if let Ok(value) = env::var("COMPBRAIN_STEPS") {
        apply_steps(config, "COMPBRAIN_STEPS", &value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"dt": "1e-3", "steps": "500"}`)
pub fn apply_cli_overrides(config: &mut CircuitConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("dt") {
        apply_dt(config, "dt", value);
    }
    if let Some(value) = cli_args.get("steps") {
        apply_steps(config, "steps", value);
    }
}

fn apply_dt(config: &mut CircuitConfig, source: &str, value: &str) {
    match value.parse::<f64>() {
        Ok(dt) => config.times.dt = dt,
        Err(_) => warn!(target: "compbrain-config", "Ignoring {}={:?}: not a number", source, value),
    }
}

fn apply_steps(config: &mut CircuitConfig, source: &str, value: &str) {
    match value.parse::<usize>() {
        Ok(steps) => config.times.steps = steps,
        Err(_) => warn!(
            target: "compbrain-config",
            "Ignoring {}={:?}: not a sample count",
            source,
            value
        ),
    }
}
