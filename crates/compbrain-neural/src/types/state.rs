// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Append-only state traces
//!
//! Every component keeps its state as a set of named, ordered traces. Index 0
//! of a seeded trace is the initial condition; each `compute` appends exactly
//! one value to every trace it owns.

use super::error::{ModelError, Result};

/// One named state trace
#[derive(Debug, Clone, PartialEq)]
pub struct StateTrace {
    name: &'static str,
    values: Vec<f64>,
    /// Whether index 0 is a persisted initial condition kept across resets
    seeded: bool,
}

impl StateTrace {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}

/// Ordered mapping from state name to its trace
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateMap {
    traces: Vec<StateTrace>,
}

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trace seeded with an initial condition
    pub fn with_initial(mut self, name: &'static str, initial: f64) -> Self {
        self.traces.push(StateTrace {
            name,
            values: vec![initial],
            seeded: true,
        });
        self
    }

    /// Add a trace with no initial entry
    pub fn with_empty(mut self, name: &'static str) -> Self {
        self.traces.push(StateTrace {
            name,
            values: Vec::new(),
            seeded: false,
        });
        self
    }

    /// Position of a named trace
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.traces.iter().position(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Values recorded for a named trace
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.traces
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.values.as_slice())
    }

    /// Most recent value of a named trace
    pub fn last(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.last().copied())
    }

    /// Most recent value of a named trace, 0 when the trace is empty or absent
    pub fn last_or_zero(&self, name: &str) -> f64 {
        self.last(name).unwrap_or(0.0)
    }

    /// Most recent value of the trace at `index`
    #[inline]
    pub fn latest(&self, index: usize) -> Option<f64> {
        self.traces
            .get(index)
            .and_then(|t| t.values.last().copied())
    }

    /// Most recent value of the trace at `index`, or an `EmptyState` error
    pub fn require(&self, index: usize, component: &str) -> Result<f64> {
        self.latest(index).ok_or_else(|| ModelError::EmptyState {
            component: component.to_string(),
            state: self.traces.get(index).map_or("?", |t| t.name),
        })
    }

    /// Append a value to the trace at `index`
    #[inline]
    pub fn push(&mut self, index: usize, value: f64) {
        self.traces[index].values.push(value);
    }

    /// Replace the trace at `index` with a single persisted initial entry
    pub fn seed(&mut self, index: usize, initial: f64) {
        let trace = &mut self.traces[index];
        trace.values.clear();
        trace.values.push(initial);
        trace.seeded = true;
    }

    /// Truncate seeded traces to their initial entry and clear the rest
    pub fn reset(&mut self) {
        for trace in &mut self.traces {
            let keep = usize::from(trace.seeded).min(trace.values.len());
            trace.values.truncate(keep);
        }
    }

    /// Length of the trace at `index`
    pub fn len_at(&self, index: usize) -> usize {
        self.traces.get(index).map_or(0, |t| t.values.len())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.traces.iter().map(|t| t.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateTrace> {
        self.traces.iter()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StateMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.traces.iter().map(|t| (t.name, &t.values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_seeded_initial_entry() {
        let mut states = StateMap::new()
            .with_initial("V", -44.5)
            .with_empty("I_syn");
        states.push(0, -40.0);
        states.push(0, -35.0);
        states.push(1, 1.5);

        states.reset();

        assert_eq!(states.get("V"), Some(&[-44.5][..]));
        assert!(states.get("I_syn").unwrap().is_empty());
    }

    #[test]
    fn test_last_or_zero_on_empty_trace() {
        let states = StateMap::new().with_empty("I_ext");
        assert_eq!(states.last_or_zero("I_ext"), 0.0);
        assert_eq!(states.last_or_zero("missing"), 0.0);
    }

    #[test]
    fn test_seed_turns_empty_trace_into_seeded() {
        let mut states = StateMap::new().with_empty("I_syn");
        states.seed(0, 2.0);
        states.push(0, 3.0);
        states.reset();
        assert_eq!(states.get("I_syn"), Some(&[2.0][..]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_ordered_object() {
        let mut states = StateMap::new().with_initial("V", 1.0).with_initial("N", 0.5);
        states.push(0, 2.0);
        states.push(1, 0.25);
        let json = serde_json::to_string(&states).unwrap();
        assert_eq!(json, r#"{"V":[1.0,2.0],"N":[0.5,0.25]}"#);
    }
}
