// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # compbrain - Computational Brain Circuits
//!
//! Small biophysical circuits of named neurons and synapses, stepped with
//! explicit Euler through a two-phase protocol: synapses read the previous
//! step's voltages, then neurons read the current step's currents.
//!
//! ## Feature Flags
//!
//! - **`config`** (default): TOML circuit documents
//! - **`observability`** (default): logging setup and per-crate debug flags
//! - **`file-logging`**: per-crate log files in timestamped run folders
//!
//! ## Usage Examples
//!
//! ### Building a circuit in code
//!
//! ```rust
//! use compbrain::prelude::*;
//!
//! let mut circuit = Circuit::new(
//!     vec![MorrisLecarNeuron::new("n1").into()],
//!     vec![InjectCurrent::new("s1", "None", "n1").into()],
//! )?;
//!
//! let t: Vec<f64> = (0..10_000).map(|i| i as f64 * 1e-4).collect();
//! circuit.execute_circuit(&t)?;
//!
//! let v = circuit.neuron_by_name("n1").unwrap().states().get("V").unwrap();
//! assert_eq!(v.len(), t.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Loading a circuit document
//!
//! ```rust,no_run
//! use compbrain::config::load_config;
//! use compbrain::circuit_from_config;
//!
//! let config = load_config(Some("circuit.toml".as_ref()), None)?;
//! let (mut circuit, t) = circuit_from_config(&config)?;
//! circuit.execute_circuit(&t)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Models: compbrain-neural                               │
//! │  (component contract, neuron and synapse models)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: compbrain-circuit                                │
//! │  (arena, wiring, two-phase stepping, trajectory)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: compbrain-config, -observability       │
//! │  (circuit documents, logging)                           │
//! └─────────────────────────────────────────────────────────┘
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use compbrain_neural as neural;

// Re-export simulation core
pub use compbrain_circuit as circuit;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use compbrain_config as config;

#[cfg(feature = "observability")]
pub use compbrain_observability as observability;

/// Errors raised while turning a circuit document into a runnable circuit
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] compbrain_config::ConfigError),

    #[error(transparent)]
    Circuit(#[from] compbrain_circuit::CircuitError),
}

/// Build and wire every component of a loaded document
///
/// Returns the circuit together with the document's time axis.
#[cfg(feature = "config")]
pub fn circuit_from_config(
    config: &compbrain_config::CircuitConfig,
) -> Result<(circuit::Circuit, ndarray::Array1<f64>), LoadError> {
    let components = config.build_components()?;
    let circuit = circuit::Circuit::new(components.neurons, components.synapses)?;
    tracing::debug!(
        target: "compbrain",
        "Circuit ready: {} neurons, {} synapses, {} samples",
        circuit.neurons().len(),
        circuit.synapses().len(),
        config.times.steps
    );
    Ok((circuit, config.times.time_axis()))
}

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::neural::{
        Component, Endpoint, GradedSynapse, HodgkinHuxleyNeuron, InjectCurrent,
        InjectCurrentOptions, IntegrateAndFireNeuron, ModelError, MorrisLecarNeuron, Neuron,
        NeuronKind, NeuronModel, Overrides, PhotoInsensitiveNeuron, StateMap, Synapse,
        SynapseKind, SynapseModel,
    };

    pub use crate::circuit::{Circuit, CircuitError, NeuronHandle, SynapseHandle, Trajectory};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, CircuitConfig, ConfigError};

    #[cfg(feature = "config")]
    pub use crate::{circuit_from_config, LoadError};
}
