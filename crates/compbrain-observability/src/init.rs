// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for compbrain binaries
//!
//! Console output is always available. With the `file-logging` feature each
//! run also writes per-crate log files into a timestamped run folder.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the event filter for the given flags and base level
pub fn build_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    let filter = debug_flags.filter_with_default(&config.level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    // stderr keeps stdout free for program output
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .with_file(false)
        .with_line_number(false);
    match config.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// Initialize console logging
///
/// # Errors
/// Fails if the filter is invalid or a global subscriber is already installed.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(debug_flags, config)?;

    Registry::default()
        .with(console_layer(config).with_filter(filter))
        .try_init()
        .context("Failed to install global tracing subscriber")?;
    Ok(())
}

#[cfg(feature = "file-logging")]
pub use file::{cleanup_old_runs, init_logging, LoggingGuard};

#[cfg(feature = "file-logging")]
mod file {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use chrono::{NaiveDateTime, Utc};
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer, Registry};

    use super::{build_filter, console_layer, BoxedLayer};
    use crate::cli::CrateDebugFlags;
    use crate::config::LoggingConfig;

    const RUN_PREFIX: &str = "run_";
    const RUN_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Logging initialization result
    ///
    /// Dropping the guard flushes the file writers.
    pub struct LoggingGuard {
        _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Get the run folder path
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize console logging plus file output
    ///
    /// Creates a timestamped folder structure:
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       ├── compbrain-circuit.log
    ///       ├── compbrain-config.log
    ///       ├── ...
    ///       └── compbrain-run.log (combined)
    /// ```
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        config: &LoggingConfig,
    ) -> Result<LoggingGuard> {
        let timestamp = Utc::now().format(RUN_FORMAT);
        let run_folder = config.log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_runs(&config.log_dir, config.retention_runs)?;

        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut file_guards = Vec::new();

        layers.push(
            console_layer(config)
                .with_filter(build_filter(debug_flags, config)?)
                .boxed(),
        );

        // One file per crate
        for crate_name in crate::KNOWN_CRATES {
            let appender = rolling::never(&run_folder, format!("{}.log", crate_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            file_guards.push(guard);

            let directive = format!("{}=debug,off", crate_name);
            let crate_filter = EnvFilter::try_new(&directive)
                .with_context(|| format!("Invalid log filter: {}", directive))?;

            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(crate_filter)
                    .boxed(),
            );
        }

        // Combined log file (all crates)
        let combined = rolling::never(&run_folder, "compbrain-run.log");
        let (combined_non_blocking, combined_guard) = tracing_appender::non_blocking(combined);
        file_guards.push(combined_guard);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(combined_non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_filter(build_filter(debug_flags, config)?)
                .boxed(),
        );

        Registry::default()
            .with(layers)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: run_folder,
        })
    }

    /// Keep only the `retention_runs` most recent run folders
    ///
    /// Returns the number of folders removed. Entries that are not run folders
    /// are left alone.
    pub fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<usize> {
        if !base_log_dir.exists() {
            return Ok(0);
        }

        let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let started = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(RUN_PREFIX))
                .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_FORMAT).ok());
            if let Some(started) = started {
                runs.push((path, started));
            }
        }

        if runs.len() <= retention_runs {
            return Ok(0);
        }

        // Oldest first
        runs.sort_by_key(|(_, started)| *started);
        let excess = runs.len() - retention_runs;
        let mut removed = 0;
        for (path, _) in runs.iter().take(excess) {
            match std::fs::remove_dir_all(path) {
                Ok(()) => removed += 1,
                Err(e) => eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                ),
            }
        }
        Ok(removed)
    }

}
