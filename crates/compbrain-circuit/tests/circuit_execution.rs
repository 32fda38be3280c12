// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Integration Tests: Circuit Execution
//!
//! - Construction: wiring, unknown endpoints, duplicate names
//! - Trajectory driver: sample counts, stimulus window, failure abort
//! - Two-phase ordering and reset reproducibility

use compbrain_circuit::{Circuit, CircuitError, EndpointRole};
use compbrain_neural::{
    Component, GradedSynapse, GradedSynapseParameters, InjectCurrent, InjectCurrentOptions,
    ModelError, MorrisLecarNeuron, NeuronModel, Overrides, StateMap,
};
use ndarray::Array1;

// ═══════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════

fn time_axis(samples: usize, dt: f64) -> Vec<f64> {
    (0..samples).map(|i| i as f64 * dt).collect()
}

/// n1 driven by a step stimulus, n1 → n2 through a graded synapse
fn stimulated_pair(samples: usize) -> Circuit {
    Circuit::new(
        vec![
            MorrisLecarNeuron::new("n1").into(),
            MorrisLecarNeuron::new("n2").into(),
        ],
        vec![
            InjectCurrent::with_options(
                "stim",
                "None",
                "n1",
                InjectCurrentOptions::step(5.0, samples),
            )
            .into(),
            GradedSynapse::new("s12", "n1", "n2").into(),
        ],
    )
    .unwrap()
}

fn snapshot(circuit: &Circuit) -> Vec<(String, StateMap)> {
    let trajectory = circuit.trajectory();
    trajectory
        .neurons()
        .chain(trajectory.synapses())
        .map(|(name, states)| (name.to_string(), states.clone()))
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════

#[test]
fn test_each_resolved_edge_recorded_once() {
    let circuit = stimulated_pair(100);
    for (index, _) in circuit.synapses().iter().enumerate() {
        let handle = circuit
            .synapse_handle(circuit.synapses()[index].name())
            .unwrap();
        for &pre in circuit.synapse_parents(handle) {
            let count = circuit
                .neuron_children(pre)
                .iter()
                .filter(|&&s| s == handle)
                .count();
            assert_eq!(count, 1);
        }
        for &post in circuit.synapse_children(handle) {
            let count = circuit
                .neuron_parents(post)
                .iter()
                .filter(|&&s| s == handle)
                .count();
            assert_eq!(count, 1);
        }
    }
}

#[test]
fn test_unknown_endpoint_rejected_before_any_step() {
    let err = Circuit::new(
        vec![MorrisLecarNeuron::new("n1").into()],
        vec![GradedSynapse::new("s1", "n1", "ghost").into()],
    )
    .unwrap_err();

    assert_eq!(
        err,
        CircuitError::UnknownEndpoint {
            synapse: "s1".to_string(),
            role: EndpointRole::Postsynaptic,
            endpoint: "ghost".to_string(),
        }
    );
}

#[test]
fn test_unknown_presynaptic_endpoint_rejected() {
    let err = Circuit::new(
        vec![MorrisLecarNeuron::new("n1").into()],
        vec![GradedSynapse::new("s1", "ghost", "n1").into()],
    )
    .unwrap_err();

    assert_eq!(
        err,
        CircuitError::UnknownEndpoint {
            synapse: "s1".to_string(),
            role: EndpointRole::Presynaptic,
            endpoint: "ghost".to_string(),
        }
    );
}

#[test]
fn test_duplicate_names_rejected() {
    let err = Circuit::new(
        vec![
            MorrisLecarNeuron::new("n1").into(),
            MorrisLecarNeuron::new("n1").into(),
        ],
        vec![],
    )
    .unwrap_err();
    assert_eq!(
        err,
        CircuitError::DuplicateName {
            name: "n1".to_string()
        }
    );

    let err = Circuit::new(
        vec![MorrisLecarNeuron::new("x").into()],
        vec![InjectCurrent::new("x", "None", "x").into()],
    )
    .unwrap_err();
    assert!(matches!(err, CircuitError::DuplicateName { .. }));
}

#[test]
fn test_unknown_override_rejected_at_construction() {
    let overrides: Overrides = [("g_Q".to_string(), 1.0)].into_iter().collect();
    let err = MorrisLecarNeuron::with_overrides("n1", &overrides).unwrap_err();
    assert!(matches!(err, ModelError::UnrecognizedArgument { .. }));
}

// ═══════════════════════════════════════════════════════════
// Trajectory Driver
// ═══════════════════════════════════════════════════════════

#[test]
fn test_end_to_end_step_stimulus() {
    let mut circuit = Circuit::new(
        vec![MorrisLecarNeuron::new("n1").into()],
        vec![InjectCurrent::new("s1", "None", "n1").into()],
    )
    .unwrap();

    let t = time_axis(10_000, 1e-4);
    circuit.execute_circuit(&t).unwrap();

    let v = circuit.neuron_by_name("n1").unwrap().states().get("V").unwrap();
    let i_ext = circuit
        .synapse_by_name("s1")
        .unwrap()
        .states()
        .get("I_ext")
        .unwrap();

    assert_eq!(v.len(), 10_000);
    assert_eq!(i_ext.len(), 10_000);
    assert!(i_ext[..2000].iter().all(|&i| i == 0.0));
    assert!(i_ext[2000..7000].iter().all(|&i| i == 5.0));
    assert!(i_ext[7000..].iter().all(|&i| i == 0.0));
    assert_eq!(circuit.steps_executed(), 10_000);
}

#[test]
fn test_every_trace_has_one_entry_per_sample() {
    let samples = 500;
    let mut circuit = stimulated_pair(samples);
    circuit
        .execute_circuit(&Array1::from(time_axis(samples, 1e-4)))
        .unwrap();

    for neuron in circuit.neurons() {
        assert_eq!(neuron.states().get("V").unwrap().len(), samples);
        assert_eq!(neuron.states().get("N").unwrap().len(), samples);
    }
    let stim = circuit.synapse_by_name("stim").unwrap();
    assert_eq!(stim.states().get("I_ext").unwrap().len(), samples);
    let graded = circuit.synapse_by_name("s12").unwrap();
    assert_eq!(graded.states().get("I_syn").unwrap().len(), samples);
}

#[test]
fn test_too_few_samples() {
    let mut circuit = stimulated_pair(10);
    let err = circuit.execute_circuit(&[0.0][..]).unwrap_err();
    assert_eq!(err, CircuitError::InsufficientTimeSamples { samples: 1 });
    assert_eq!(circuit.steps_executed(), 0);
}

#[test]
fn test_compute_failure_aborts_run() {
    let mut circuit = Circuit::new(
        vec![MorrisLecarNeuron::new("n1").into()],
        vec![InjectCurrent::with_options(
            "s1",
            "None",
            "n1",
            InjectCurrentOptions::from_waveform(vec![1.0, 1.0, 1.0]),
        )
        .into()],
    )
    .unwrap();

    let err = circuit.execute_circuit(&time_axis(10, 1e-4)).unwrap_err();
    match err {
        CircuitError::Component { name, source } => {
            assert_eq!(name, "s1");
            assert!(matches!(
                source,
                ModelError::WaveformExhausted { step: 3, len: 3, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }

    // Three full steps completed before the fourth synapse phase failed
    let v = circuit.neuron_by_name("n1").unwrap().states().get("V").unwrap();
    assert_eq!(v.len(), 4);
}

// ═══════════════════════════════════════════════════════════
// Phase Ordering
// ═══════════════════════════════════════════════════════════

#[test]
fn test_synapse_reads_previous_step_voltages() {
    let samples = 300;
    let mut circuit = stimulated_pair(samples);
    circuit.execute_circuit(&time_axis(samples, 1e-4)).unwrap();

    let v1 = circuit.neuron_by_name("n1").unwrap().states().get("V").unwrap();
    let v2 = circuit.neuron_by_name("n2").unwrap().states().get("V").unwrap();
    let i_syn = circuit
        .synapse_by_name("s12")
        .unwrap()
        .states()
        .get("I_syn")
        .unwrap();

    // Entry i of every voltage trace is the state before step i
    let params = GradedSynapseParameters::default();
    for i in 0..samples {
        assert_eq!(i_syn[i], params.current(v1[i], v2[i]), "step {i}");
    }
}

#[test]
fn test_neuron_reads_current_step_synaptic_current() {
    let samples = 300;
    let dt = 1e-4;
    let mut circuit = stimulated_pair(samples);
    circuit.execute_circuit(&time_axis(samples, dt)).unwrap();

    let i_syn = circuit
        .synapse_by_name("s12")
        .unwrap()
        .states()
        .get("I_syn")
        .unwrap()
        .to_vec();

    // Replaying the recorded currents into a standalone neuron reproduces n2
    let mut replay = MorrisLecarNeuron::new("n2");
    for &current in &i_syn[..samples - 1] {
        replay.compute(current, 0.0, dt).unwrap();
    }
    assert_eq!(
        replay.states(),
        circuit.neuron_by_name("n2").unwrap().states()
    );
}

// ═══════════════════════════════════════════════════════════
// Reset
// ═══════════════════════════════════════════════════════════

#[test]
fn test_reset_then_rerun_matches_fresh_circuit() {
    let samples = 400;
    let t = time_axis(samples, 1e-4);

    let mut reused = stimulated_pair(samples);
    reused.execute_circuit(&t).unwrap();
    reused.reset();
    reused.execute_circuit(&t).unwrap();

    let mut fresh = stimulated_pair(samples);
    fresh.execute_circuit(&t).unwrap();

    assert_eq!(snapshot(&reused), snapshot(&fresh));
}

#[test]
fn test_seeded_synapse_state_survives_reset() {
    let overrides: Overrides = [("I_syn".to_string(), 0.25)].into_iter().collect();
    let mut circuit = Circuit::new(
        vec![
            MorrisLecarNeuron::new("n1").into(),
            MorrisLecarNeuron::new("n2").into(),
        ],
        vec![GradedSynapse::with_overrides("s", "n1", "n2", &overrides)
            .unwrap()
            .into()],
    )
    .unwrap();

    circuit.execute_circuit(&time_axis(5, 1e-4)).unwrap();
    let states = circuit.synapse_by_name("s").unwrap().states();
    assert_eq!(states.get("I_syn").unwrap().len(), 6);

    circuit.reset();
    let states = circuit.synapse_by_name("s").unwrap().states();
    assert_eq!(states.get("I_syn").unwrap(), &[0.25]);
}

// ═══════════════════════════════════════════════════════════
// Export
// ═══════════════════════════════════════════════════════════

#[test]
fn test_trajectory_json_shape() {
    let mut circuit = Circuit::new(
        vec![MorrisLecarNeuron::new("n1").into()],
        vec![InjectCurrent::with_options(
            "s1",
            "None",
            "n1",
            InjectCurrentOptions::from_waveform(vec![0.0, 0.0]),
        )
        .into()],
    )
    .unwrap();
    circuit.execute_circuit(&[0.0, 1e-4][..]).unwrap();

    let json = serde_json::to_value(circuit.trajectory()).unwrap();
    assert_eq!(json["neurons"]["n1"]["V"].as_array().unwrap().len(), 2);
    assert_eq!(json["neurons"]["n1"]["N"].as_array().unwrap().len(), 2);
    assert_eq!(json["synapses"]["s1"]["I_ext"], serde_json::json!([0.0, 0.0]));
    assert_eq!(json["synapses"]["s1"]["I_syn"], serde_json::json!([]));

    assert!(circuit.trajectory().states("s1").is_some());
    assert!(circuit.trajectory().states("nope").is_none());
}
