// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # memristor-observability
//!
//! Logging setup shared by every binary and test harness that drives a
//! memristor learning run, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log file in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Crate names accepted by `--debug-<crate>` flags
pub const KNOWN_CRATES: &[&str] = &[
    "memristor-device",
    "memristor-plasticity",
    "memristor-config",
    "memristor-learning",
];
