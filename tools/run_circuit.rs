// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Circuit runner.
//!
//! Loads a circuit document, executes it over the document's time axis and
//! logs the final value of every state. With `--json` the full trajectory is
//! written to stdout.

use std::collections::HashMap;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use compbrain::circuit_from_config;
use compbrain::config::load_config;
use compbrain::neural::{Component, StateMap};
#[cfg(not(feature = "file-logging"))]
use compbrain::observability::init_console_logging;
#[cfg(feature = "file-logging")]
use compbrain::observability::{init_console_logging, init_logging};
use compbrain::observability::{debug_flags_help, parse_debug_flags, LogFormat, LoggingConfig};
use tracing::info;

struct Args {
    config: Option<PathBuf>,
    overrides: HashMap<String, String>,
    json: bool,
    logging: LoggingConfig,
    /// Write per-crate log files under `logging.log_dir`
    #[cfg(feature = "file-logging")]
    log_to_files: bool,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: run_circuit [--config <path>] [--dt <seconds>] [--steps <count>] [--json]\n\
         \x20                  [--log-format <full|compact>] [--log-dir <path>] [--keep-runs <count>]\n\n\
         Defaults:\n\
         - config: $COMPBRAIN_CONFIG_PATH, else circuit.toml in the current or a parent directory\n\
         - dt, steps: taken from the document's [times] table\n\
         - log files: off; --log-dir needs the file-logging feature\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        overrides: HashMap::new(),
        json: false,
        logging: LoggingConfig::default(),
        #[cfg(feature = "file-logging")]
        log_to_files: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--dt" | "--steps" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.overrides.insert(arg[2..].to_string(), v);
            }
            "--json" => parsed.json = true,
            "--log-format" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.logging.format = LogFormat::from_name(&v).unwrap_or_else(|| {
                    eprintln!("Unknown log format: {v}");
                    usage_and_exit()
                });
            }
            #[cfg(feature = "file-logging")]
            "--log-dir" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.logging.log_dir = PathBuf::from(v);
                parsed.log_to_files = true;
            }
            #[cfg(feature = "file-logging")]
            "--keep-runs" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.logging.retention_runs = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn summarize(kind: &str, name: &str, states: &StateMap) {
    let finals: Vec<String> = states
        .iter()
        .map(|trace| match trace.values().last() {
            Some(v) => format!("{}={:.4}", trace.name(), v),
            None => format!("{}=<empty>", trace.name()),
        })
        .collect();
    info!(target: "compbrain", "{} {}: {}", kind, name, finals.join(", "));
}

fn main() -> Result<()> {
    let mut args = parse_args();

    let debug_flags = parse_debug_flags();
    // Targets matter once individual crates are being debugged
    args.logging.with_target = debug_flags.any_enabled();

    #[cfg(feature = "file-logging")]
    let _logging_guard = if args.log_to_files {
        let guard = init_logging(&debug_flags, &args.logging)?;
        info!(target: "compbrain", "Writing logs to {}", guard.log_dir().display());
        Some(guard)
    } else {
        init_console_logging(&debug_flags, &args.logging)?;
        None
    };
    #[cfg(not(feature = "file-logging"))]
    init_console_logging(&debug_flags, &args.logging)?;

    let config = load_config(args.config.as_deref(), Some(&args.overrides))
        .context("Failed to load circuit document")?;
    let (mut circuit, t) = circuit_from_config(&config)?;

    let started = Instant::now();
    circuit
        .execute_circuit(&t)
        .context("Circuit execution failed")?;
    info!(
        target: "compbrain",
        "Executed {} samples ({:.3} s simulated) in {:.2?}",
        t.len(),
        config.times.duration(),
        started.elapsed()
    );

    for neuron in circuit.neurons() {
        summarize("neuron", neuron.name(), neuron.states());
    }
    for synapse in circuit.synapses() {
        summarize("synapse", synapse.name(), synapse.states());
    }

    if args.json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &circuit.trajectory())
            .context("Failed to write trajectory")?;
        writeln!(out)?;
    }

    Ok(())
}
