// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read-only export of recorded component states
//!
//! Serializes as
//! `{"neurons": {name: {state: [..]}}, "synapses": {name: {state: [..]}}}`
//! with components in circuit order.

use compbrain_neural::{Component, Neuron, StateMap, Synapse};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Borrowed view of a circuit's state traces
#[derive(Debug, Clone, Copy)]
pub struct Trajectory<'a> {
    neurons: &'a [Neuron],
    synapses: &'a [Synapse],
}

impl<'a> Trajectory<'a> {
    pub(crate) fn new(neurons: &'a [Neuron], synapses: &'a [Synapse]) -> Self {
        Self { neurons, synapses }
    }

    pub fn neurons(&self) -> impl Iterator<Item = (&'a str, &'a StateMap)> + 'a {
        let neurons: &'a [Neuron] = self.neurons;
        neurons.iter().map(|n| (n.name(), n.states()))
    }

    pub fn synapses(&self) -> impl Iterator<Item = (&'a str, &'a StateMap)> + 'a {
        let synapses: &'a [Synapse] = self.synapses;
        synapses.iter().map(|s| (s.name(), s.states()))
    }

    /// States of the named component, neuron or synapse
    pub fn states(&self, name: &str) -> Option<&'a StateMap> {
        self.neurons()
            .chain(self.synapses())
            .find(|(n, _)| *n == name)
            .map(|(_, states)| states)
    }
}

struct ComponentStates<'a, C>(&'a [C]);

impl<C: Component> Serialize for ComponentStates<'_, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|c| (c.name(), c.states())))
    }
}

impl Serialize for Trajectory<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Trajectory", 2)?;
        state.serialize_field("neurons", &ComponentStates(self.neurons))?;
        state.serialize_field("synapses", &ComponentStates(self.synapses))?;
        state.end()
    }
}
