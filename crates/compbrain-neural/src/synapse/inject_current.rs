// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Current Injection Source
//!
//! External stimulation modelled as a synapse with no presynaptic neuron. The
//! source replays a precomputed waveform, one sample per step, into its
//! `I_ext` trace. Endpoint voltages are not read.

use super::endpoint::Endpoint;
use crate::models::{Component, SynapseModel};
use crate::types::{ModelError, ParameterSnapshot, Result, StateMap};

// Trace order: I_ext, I_syn
const I_EXT: usize = 0;

/// Generated stimulus shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StimulusKind {
    /// Zero outside a window, constant `intensity` inside it
    #[default]
    Step,
}

impl StimulusKind {
    /// Resolve a configuration stimulus name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "step" => Ok(StimulusKind::Step),
            other => Err(ModelError::UnknownStimulus(other.to_string())),
        }
    }
}

/// Construction options for an injection source
#[derive(Debug, Clone, PartialEq)]
pub struct InjectCurrentOptions {
    /// Explicit waveform; when set, the generated stimulus is not used
    pub waveform: Option<Vec<f64>>,
    pub stimulus: StimulusKind,
    /// Stimulus amplitude
    pub intensity: f64,
    /// Waveform length, normally the number of time samples
    pub samples: usize,
    /// Fraction of the sample count at which the stimulus switches on
    pub window_start: f64,
    /// Fraction of the sample count at which the stimulus switches off
    pub window_end: f64,
}

impl Default for InjectCurrentOptions {
    fn default() -> Self {
        Self {
            waveform: None,
            stimulus: StimulusKind::Step,
            intensity: 5.0,
            samples: 10_000,
            window_start: 0.2,
            window_end: 0.7,
        }
    }
}

impl InjectCurrentOptions {
    /// Step stimulus of the given amplitude over `samples` steps
    pub fn step(intensity: f64, samples: usize) -> Self {
        Self {
            intensity,
            samples,
            ..Self::default()
        }
    }

    /// Replay an explicit waveform
    pub fn from_waveform(waveform: Vec<f64>) -> Self {
        Self {
            samples: waveform.len(),
            waveform: Some(waveform),
            ..Self::default()
        }
    }

    /// Materialise the waveform these options describe
    pub fn waveform(&self) -> Vec<f64> {
        if let Some(waveform) = &self.waveform {
            return waveform.clone();
        }
        match self.stimulus {
            StimulusKind::Step => {
                let n = self.samples as f64;
                let start = ((self.window_start * n) as usize).min(self.samples);
                let end = ((self.window_end * n) as usize).min(self.samples);
                let mut waveform = vec![0.0; self.samples];
                if start < end {
                    waveform[start..end].fill(self.intensity);
                }
                waveform
            }
        }
    }
}

/// Current injection source
#[derive(Debug, Clone)]
pub struct InjectCurrent {
    name: String,
    presynaptic: Endpoint,
    postsynaptic: Endpoint,
    options: InjectCurrentOptions,
    waveform: Vec<f64>,
    /// Index of the next waveform sample
    count: usize,
    states: StateMap,
}

impl InjectCurrent {
    pub const MODEL_NAME: &'static str = "InjectCurrent";

    /// Default step stimulus: amplitude 5 over 20%–70% of 10000 samples
    pub fn new(
        name: impl Into<String>,
        presynaptic: impl Into<Endpoint>,
        postsynaptic: impl Into<Endpoint>,
    ) -> Self {
        Self::with_options(
            name,
            presynaptic,
            postsynaptic,
            InjectCurrentOptions::default(),
        )
    }

    pub fn with_options(
        name: impl Into<String>,
        presynaptic: impl Into<Endpoint>,
        postsynaptic: impl Into<Endpoint>,
        options: InjectCurrentOptions,
    ) -> Self {
        let waveform = options.waveform();
        Self {
            name: name.into(),
            presynaptic: presynaptic.into(),
            postsynaptic: postsynaptic.into(),
            options,
            waveform,
            count: 0,
            states: StateMap::new().with_empty("I_ext").with_empty("I_syn"),
        }
    }

    pub fn waveform(&self) -> &[f64] {
        &self.waveform
    }

    pub fn options(&self) -> &InjectCurrentOptions {
        &self.options
    }

    /// Number of samples already emitted
    pub fn position(&self) -> usize {
        self.count
    }
}

impl Component for InjectCurrent {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    fn parameters(&self) -> ParameterSnapshot {
        vec![
            ("intensity", self.options.intensity),
            ("samples", self.waveform.len() as f64),
            ("window_start", self.options.window_start),
            ("window_end", self.options.window_end),
        ]
    }

    fn states(&self) -> &StateMap {
        &self.states
    }

    fn reset(&mut self) {
        self.states.reset();
        self.count = 0;
    }
}

impl SynapseModel for InjectCurrent {
    fn presynaptic(&self) -> &Endpoint {
        &self.presynaptic
    }

    fn postsynaptic(&self) -> &Endpoint {
        &self.postsynaptic
    }

    fn reads_voltage(&self) -> bool {
        false
    }

    fn compute(&mut self, _v_pre: f64, _v_post: f64) -> Result<&StateMap> {
        let value = *self
            .waveform
            .get(self.count)
            .ok_or_else(|| ModelError::WaveformExhausted {
                component: self.name.clone(),
                step: self.count,
                len: self.waveform.len(),
            })?;
        self.states.push(I_EXT, value);
        self.count += 1;
        Ok(&self.states)
    }
}
