// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Circuit
//!
//! Owns the neuron and synapse lists and the bipartite dependency graph
//! between them. Components live in two arenas; edges are handle lists held by
//! the circuit, so there are no back-references to break on teardown.
//!
//! ## Step protocol
//! 1. **Synapse phase**: every synapse, in list order, reads the summed voltage
//!    of its parent neurons and child neurons and appends its currents.
//! 2. **Neuron phase**: every neuron, in list order, reads the summed `I_syn`
//!    and `I_ext` of its parent synapses and appends its new state.
//!
//! Synapses therefore always see voltages from the previous step and neurons
//! always see currents from the current step, independent of ordering within
//! a phase.

use ahash::AHashMap;
use compbrain_neural::{
    Component, Endpoint, Neuron, NeuronModel, Synapse, SynapseModel,
};
use ndarray::ArrayView1;
use tracing::{debug, info, trace};

use crate::error::{CircuitError, EndpointRole, Result};
use crate::trajectory::Trajectory;

/// Stable index of a neuron within its circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronHandle(usize);

impl NeuronHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable index of a synapse within its circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynapseHandle(usize);

impl SynapseHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
struct NeuronEdges {
    /// Synapses whose postsynaptic endpoint is this neuron
    parents: Vec<SynapseHandle>,
    /// Synapses whose presynaptic endpoint is this neuron
    children: Vec<SynapseHandle>,
}

#[derive(Debug, Clone, Default)]
struct SynapseEdges {
    parents: Vec<NeuronHandle>,
    children: Vec<NeuronHandle>,
}

/// A wired set of neurons and synapses
///
/// Handles are only meaningful for the circuit that issued them; accessors
/// taking a handle panic on a handle from another circuit that is out of range.
#[derive(Debug, Clone)]
pub struct Circuit {
    neurons: Vec<Neuron>,
    synapses: Vec<Synapse>,
    neuron_edges: Vec<NeuronEdges>,
    synapse_edges: Vec<SynapseEdges>,
    neuron_index: AHashMap<String, NeuronHandle>,
    synapse_index: AHashMap<String, SynapseHandle>,
    steps_executed: usize,
}

impl Circuit {
    /// Take ownership of the components and wire them by endpoint name
    ///
    /// Synapses are processed in list order, the presynaptic edge before the
    /// postsynaptic one. An endpoint naming no neuron (other than the
    /// unconnected sentinel) aborts construction.
    pub fn new(neurons: Vec<Neuron>, synapses: Vec<Synapse>) -> Result<Self> {
        let mut neuron_index = AHashMap::with_capacity(neurons.len());
        for (index, neuron) in neurons.iter().enumerate() {
            if neuron_index
                .insert(neuron.name().to_string(), NeuronHandle(index))
                .is_some()
            {
                return Err(CircuitError::DuplicateName {
                    name: neuron.name().to_string(),
                });
            }
        }

        let mut synapse_index = AHashMap::with_capacity(synapses.len());
        for (index, synapse) in synapses.iter().enumerate() {
            let name = synapse.name();
            if neuron_index.contains_key(name)
                || synapse_index
                    .insert(name.to_string(), SynapseHandle(index))
                    .is_some()
            {
                return Err(CircuitError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        let mut neuron_edges = vec![NeuronEdges::default(); neurons.len()];
        let mut synapse_edges = vec![SynapseEdges::default(); synapses.len()];

        for (index, synapse) in synapses.iter().enumerate() {
            let handle = SynapseHandle(index);

            if let Some(pre) = resolve(
                &neuron_index,
                synapse,
                synapse.presynaptic(),
                EndpointRole::Presynaptic,
            )? {
                neuron_edges[pre.0].children.push(handle);
                synapse_edges[index].parents.push(pre);
            }

            if let Some(post) = resolve(
                &neuron_index,
                synapse,
                synapse.postsynaptic(),
                EndpointRole::Postsynaptic,
            )? {
                neuron_edges[post.0].parents.push(handle);
                synapse_edges[index].children.push(post);
            }
        }

        debug!(
            target: "compbrain-circuit",
            "Wired circuit: {} neurons, {} synapses",
            neurons.len(),
            synapses.len()
        );

        Ok(Self {
            neurons,
            synapses,
            neuron_edges,
            synapse_edges,
            neuron_index,
            synapse_index,
            steps_executed: 0,
        })
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    pub fn neuron_handle(&self, name: &str) -> Option<NeuronHandle> {
        self.neuron_index.get(name).copied()
    }

    pub fn synapse_handle(&self, name: &str) -> Option<SynapseHandle> {
        self.synapse_index.get(name).copied()
    }

    pub fn neuron(&self, handle: NeuronHandle) -> &Neuron {
        &self.neurons[handle.0]
    }

    pub fn synapse(&self, handle: SynapseHandle) -> &Synapse {
        &self.synapses[handle.0]
    }

    pub fn neuron_by_name(&self, name: &str) -> Option<&Neuron> {
        self.neuron_handle(name).map(|h| self.neuron(h))
    }

    pub fn synapse_by_name(&self, name: &str) -> Option<&Synapse> {
        self.synapse_handle(name).map(|h| self.synapse(h))
    }

    /// Number of `execute_step` calls since construction or the last reset
    pub fn steps_executed(&self) -> usize {
        self.steps_executed
    }

    // ---------------------------------------------------------------------
    // Graph
    // ---------------------------------------------------------------------

    /// Synapses delivering current into this neuron
    pub fn neuron_parents(&self, handle: NeuronHandle) -> &[SynapseHandle] {
        &self.neuron_edges[handle.0].parents
    }

    /// Synapses reading this neuron's voltage as presynaptic input
    pub fn neuron_children(&self, handle: NeuronHandle) -> &[SynapseHandle] {
        &self.neuron_edges[handle.0].children
    }

    /// Presynaptic neurons of this synapse
    pub fn synapse_parents(&self, handle: SynapseHandle) -> &[NeuronHandle] {
        &self.synapse_edges[handle.0].parents
    }

    /// Postsynaptic neurons of this synapse
    pub fn synapse_children(&self, handle: SynapseHandle) -> &[NeuronHandle] {
        &self.synapse_edges[handle.0].children
    }

    // ---------------------------------------------------------------------
    // Summed inputs
    // ---------------------------------------------------------------------

    /// Sum of the latest `I_syn` over every parent synapse
    ///
    /// A parent with no recorded current contributes 0.
    pub fn synaptic_current(&self, handle: NeuronHandle) -> f64 {
        self.neuron_parents(handle)
            .iter()
            .map(|s| self.synapses[s.0].synaptic_current())
            .sum()
    }

    /// Sum of the latest `I_ext` over every parent synapse
    pub fn injected_current(&self, handle: NeuronHandle) -> f64 {
        self.neuron_parents(handle)
            .iter()
            .map(|s| self.synapses[s.0].injected_current())
            .sum()
    }

    /// Sum of the latest voltage over every presynaptic neuron
    pub fn presynaptic_voltage(&self, handle: SynapseHandle) -> Result<f64> {
        self.summed_voltage(self.synapse_parents(handle))
    }

    /// Sum of the latest voltage over every postsynaptic neuron
    pub fn postsynaptic_voltage(&self, handle: SynapseHandle) -> Result<f64> {
        self.summed_voltage(self.synapse_children(handle))
    }

    fn summed_voltage(&self, neurons: &[NeuronHandle]) -> Result<f64> {
        let mut total = 0.0;
        for handle in neurons {
            let neuron = &self.neurons[handle.0];
            total += neuron
                .voltage()
                .map_err(|source| CircuitError::component(neuron.name(), source))?;
        }
        Ok(total)
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Run one step of the two-phase protocol
    ///
    /// The first failing component aborts the step; components already
    /// stepped keep their new entries.
    pub fn execute_step(
        &mut self,
        dt: f64,
        synapses_enabled: bool,
        neurons_enabled: bool,
    ) -> Result<()> {
        if synapses_enabled {
            for index in 0..self.synapses.len() {
                let handle = SynapseHandle(index);
                let (v_pre, v_post) = if self.synapses[index].reads_voltage() {
                    (
                        self.presynaptic_voltage(handle)?,
                        self.postsynaptic_voltage(handle)?,
                    )
                } else {
                    (0.0, 0.0)
                };

                let synapse = &mut self.synapses[index];
                let outcome = synapse.compute(v_pre, v_post).map(drop);
                if let Err(source) = outcome {
                    return Err(CircuitError::component(synapse.name(), source));
                }
            }
        }

        if neurons_enabled {
            for index in 0..self.neurons.len() {
                let handle = NeuronHandle(index);
                let i_syn = self.synaptic_current(handle);
                let i_ext = self.injected_current(handle);

                let neuron = &mut self.neurons[index];
                let outcome = neuron.compute(i_syn, i_ext, dt).map(drop);
                if let Err(source) = outcome {
                    return Err(CircuitError::component(neuron.name(), source));
                }
            }
        }

        self.steps_executed += 1;
        trace!(
            target: "compbrain-circuit",
            step = self.steps_executed,
            synapses_enabled,
            neurons_enabled,
            "step complete"
        );
        Ok(())
    }

    /// Drive the circuit over a uniform time axis
    ///
    /// `dt` is taken from the first two samples. Every sample but the last gets
    /// a full step; the last gets a synapse-only step, so each voltage trace
    /// (including its initial value) and each current trace ends up with one
    /// entry per sample.
    pub fn execute_circuit<'a>(&mut self, t: impl Into<ArrayView1<'a, f64>>) -> Result<()> {
        let t = t.into();
        let samples = t.len();
        if samples < 2 {
            return Err(CircuitError::InsufficientTimeSamples { samples });
        }
        let dt = t[1] - t[0];

        info!(
            target: "compbrain-circuit",
            "Executing circuit: {} samples, dt={}",
            samples,
            dt
        );

        let decile = (samples / 10).max(1);
        for step in 0..samples - 1 {
            self.execute_step(dt, true, true)?;
            let done = step + 1;
            if done % decile == 0 {
                debug!(
                    target: "compbrain-circuit",
                    "Progress: {}/{} ({}%)",
                    done,
                    samples,
                    done * 100 / samples
                );
            }
        }
        self.execute_step(dt, true, false)?;

        info!(
            target: "compbrain-circuit",
            "Circuit execution complete: {} steps",
            self.steps_executed
        );
        Ok(())
    }

    /// Reset every component to its initial condition
    ///
    /// Edges are left untouched.
    pub fn reset(&mut self) {
        for neuron in &mut self.neurons {
            neuron.reset();
        }
        for synapse in &mut self.synapses {
            synapse.reset();
        }
        self.steps_executed = 0;
    }

    /// Serializable view of every component's recorded states
    pub fn trajectory(&self) -> Trajectory<'_> {
        Trajectory::new(&self.neurons, &self.synapses)
    }

    /// Give the components back, dropping the graph
    pub fn into_components(self) -> (Vec<Neuron>, Vec<Synapse>) {
        (self.neurons, self.synapses)
    }
}

fn resolve(
    index: &AHashMap<String, NeuronHandle>,
    synapse: &Synapse,
    endpoint: &Endpoint,
    role: EndpointRole,
) -> Result<Option<NeuronHandle>> {
    match endpoint {
        Endpoint::Unconnected => Ok(None),
        Endpoint::Neuron(name) => index.get(name.as_str()).copied().map(Some).ok_or_else(|| {
            CircuitError::UnknownEndpoint {
                synapse: synapse.name().to_string(),
                role,
                endpoint: name.clone(),
            }
        }),
    }
}
