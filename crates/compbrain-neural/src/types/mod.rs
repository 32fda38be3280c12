// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Types Module
//!
//! Shared types for component state, construction overrides, and errors.

pub mod error;
pub mod overrides;
pub mod state;

pub use error::{ModelError, Result};
pub use overrides::{apply_overrides, ModelParameters, Overrides, ParameterSnapshot};
pub use state::{StateMap, StateTrace};
