// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Integration Tests: Circuit Documents
//!
//! Loads TOML circuit documents through the umbrella crate and runs them end
//! to end: parsing, model dispatch, wiring, execution and trajectory export.

use std::fs;
use std::path::{Path, PathBuf};

use compbrain::circuit::CircuitError;
use compbrain::config::ConfigError;
use compbrain::neural::ModelError;
use compbrain::prelude::*;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════

fn shipped_circuit(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("circuits").join(file)
}

fn write_document(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("circuit.toml");
    fs::write(&path, content).unwrap();
    path
}

fn load_and_build(content: &str) -> Result<(Circuit, ndarray::Array1<f64>), LoadError> {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, content);
    let config = load_config(Some(path.as_path()), None)?;
    circuit_from_config(&config)
}

fn trace<'a>(circuit: &'a Circuit, name: &str, state: &str) -> &'a [f64] {
    circuit
        .trajectory()
        .states(name)
        .and_then(|states| states.get(state))
        .unwrap_or_else(|| panic!("{name} has no {state} trace"))
}

// ═══════════════════════════════════════════════════════════
// Shipped Documents
// ═══════════════════════════════════════════════════════════

#[test]
fn test_morris_lecar_step_document() {
    let config = load_config(Some(shipped_circuit("morris_lecar_step.toml").as_path()), None).unwrap();
    let (mut circuit, t) = circuit_from_config(&config).unwrap();
    assert_eq!(t.len(), 10_000);

    circuit.execute_circuit(&t).unwrap();

    let v = trace(&circuit, "n1", "V");
    assert_eq!(v.len(), 10_000);
    assert_eq!(v[0], -40.0);
    assert!(v.iter().all(|x| x.is_finite()));

    let i_ext = trace(&circuit, "s1", "I_ext");
    assert_eq!(i_ext.len(), 10_000);
    assert_eq!(i_ext[1999], 0.0);
    assert_eq!(i_ext[2000], 5.0);
    assert_eq!(i_ext[6999], 5.0);
    assert_eq!(i_ext[7000], 0.0);
}

#[test]
fn test_graded_pair_document() {
    let config = load_config(Some(shipped_circuit("graded_pair.toml").as_path()), None).unwrap();
    let (mut circuit, t) = circuit_from_config(&config).unwrap();

    let s2 = circuit.synapse_by_name("s2").unwrap();
    assert_eq!(s2.kind(), SynapseKind::Graded);
    assert_eq!(
        circuit.neuron_by_name("n2").unwrap().kind(),
        NeuronKind::PhotoInsensitive
    );

    circuit.execute_circuit(&t).unwrap();

    assert_eq!(trace(&circuit, "n2", "V").len(), t.len());
    let i_syn = trace(&circuit, "s2", "I_syn");
    assert_eq!(i_syn.len(), t.len());
    assert!(i_syn.iter().all(|x| x.is_finite()));
}

#[test]
fn test_integrate_and_fire_document() {
    let config = load_config(Some(shipped_circuit("integrate_and_fire.toml").as_path()), None).unwrap();
    let (mut circuit, t) = circuit_from_config(&config).unwrap();
    circuit.execute_circuit(&t).unwrap();

    let v = trace(&circuit, "n1", "V");
    assert_eq!(v.len(), t.len());
    assert_eq!(v[0], -80.0);
}

// ═══════════════════════════════════════════════════════════
// Error Paths
// ═══════════════════════════════════════════════════════════

#[test]
fn test_unknown_neuron_model() {
    let err = load_and_build(
        r#"
[neurons.Izhikevich.n1]

[synapses.InjectCurrent.s1]
presynaptic = "None"
postsynaptic = "n1"
"#,
    )
    .unwrap_err();

    match err {
        LoadError::Config(ConfigError::UnknownModel { kind, name }) => {
            assert_eq!(kind, "neuron");
            assert_eq!(name, "Izhikevich");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_endpoint_from_document() {
    let err = load_and_build(
        r#"
[neurons.MorrisLecar.n1]

[synapses.CustomSynapse.s1]
presynaptic = "n1"
postsynaptic = "n9"
"#,
    )
    .unwrap_err();

    assert!(
        matches!(
            err,
            LoadError::Circuit(CircuitError::UnknownEndpoint { ref endpoint, .. }) if endpoint == "n9"
        ),
        "{err}"
    );
}

#[test]
fn test_unrecognized_override_from_document() {
    let err = load_and_build(
        r#"
[neurons.MorrisLecar.n1]
g_Q = 1.0

[synapses.InjectCurrent.s1]
presynaptic = "None"
postsynaptic = "n1"
"#,
    )
    .unwrap_err();

    match err {
        LoadError::Config(ConfigError::Model { instance, source }) => {
            assert_eq!(instance, "n1");
            assert!(matches!(source, ModelError::UnrecognizedArgument { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_nominal_neuron_dt_accepted_from_document() {
    let (circuit, _) = load_and_build(
        r#"
[neurons.MorrisLecar.n1]
dt = 1e-4

[synapses.InjectCurrent.s1]
presynaptic = "None"
postsynaptic = "n1"
"#,
    )
    .unwrap();

    let params = circuit.neuron_by_name("n1").unwrap().parameters();
    assert!(params.contains(&("dt", 1e-4)));
}

// ═══════════════════════════════════════════════════════════
// Trajectory Export
// ═══════════════════════════════════════════════════════════

#[test]
fn test_trajectory_json_after_short_run() {
    let (mut circuit, t) = load_and_build(
        r#"
[times]
dt = 1e-4
steps = 50

[neurons.HodgkinHuxley.n1]

[synapses.InjectCurrent.s1]
presynaptic = "None"
postsynaptic = "n1"
intensity = 10.0
"#,
    )
    .unwrap();
    assert_eq!(t.len(), 50);

    circuit.execute_circuit(&t).unwrap();
    let json = serde_json::to_value(circuit.trajectory()).unwrap();

    let n1 = &json["neurons"]["n1"];
    for state in ["V", "n", "m", "h"] {
        assert_eq!(n1[state].as_array().unwrap().len(), 50, "{state}");
    }
    let s1 = &json["synapses"]["s1"];
    assert_eq!(s1["I_ext"].as_array().unwrap().len(), 50);
    assert!(s1["I_syn"].as_array().unwrap().is_empty());
}
