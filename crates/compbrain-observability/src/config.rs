//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Console line format
    pub format: LogFormat,

    /// Print event targets on the console
    pub with_target: bool,

    /// Colour console output
    pub ansi: bool,

    /// Base directory for run folders (file logging only)
    pub log_dir: PathBuf,

    /// Number of most recent run folders kept (file logging only)
    pub retention_runs: usize,
}

/// Console line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}

impl LogFormat {
    /// Parse a format name as given on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full" => Some(LogFormat::Full),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Full,
            with_target: false,
            ansi: true,
            log_dir: PathBuf::from("./logs"),
            retention_runs: 10,
        }
    }
}
