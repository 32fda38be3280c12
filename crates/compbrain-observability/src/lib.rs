// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # compbrain-observability
//!
//! Logging setup shared by compbrain binaries and tests.
//!
//! Library crates only emit `tracing` events under their crate name as target;
//! this crate decides where those events go, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: timestamped run folders with per-crate log files

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known compbrain crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "compbrain",
    "compbrain-neural",
    "compbrain-circuit",
    "compbrain-config",
];
