// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse endpoint names

use core::fmt;

/// Spelling of the "no endpoint" sentinel in configuration documents
pub const UNCONNECTED: &str = "None";

/// Presynaptic or postsynaptic endpoint of a synapse
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Connected to the neuron with this name
    Neuron(String),
    /// No neuron on this side (injection sources, dangling outputs)
    Unconnected,
}

impl Endpoint {
    /// Parse a configuration endpoint name, mapping the sentinel to `Unconnected`
    pub fn parse(name: &str) -> Self {
        if name == UNCONNECTED {
            Endpoint::Unconnected
        } else {
            Endpoint::Neuron(name.to_string())
        }
    }

    pub fn neuron_name(&self) -> Option<&str> {
        match self {
            Endpoint::Neuron(name) => Some(name),
            Endpoint::Unconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Endpoint::Neuron(_))
    }
}

impl From<&str> for Endpoint {
    fn from(name: &str) -> Self {
        Endpoint::parse(name)
    }
}

impl From<String> for Endpoint {
    fn from(name: String) -> Self {
        if name == UNCONNECTED {
            Endpoint::Unconnected
        } else {
            Endpoint::Neuron(name)
        }
    }
}

impl<T: Into<Endpoint>> From<Option<T>> for Endpoint {
    fn from(name: Option<T>) -> Self {
        name.map_or(Endpoint::Unconnected, Into::into)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Neuron(name) => f.write_str(name),
            Endpoint::Unconnected => f.write_str(UNCONNECTED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_parses_to_unconnected() {
        assert_eq!(Endpoint::parse("None"), Endpoint::Unconnected);
        assert_eq!(Endpoint::from("n1"), Endpoint::Neuron("n1".to_string()));
        assert_eq!(Endpoint::from(None::<&str>), Endpoint::Unconnected);
        assert_eq!(Endpoint::Unconnected.to_string(), "None");
    }
}
