// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Memristor Devices
//!
//! Phenomenological memristor models used as adaptive synaptic weights:
//! - **Models**: single power-law device and a differential (positive/negative) pair
//! - **Array**: `output_size x input_size` device grid with a mirrored weight matrix
//! - **Params**: fitted physical constants and their validation
//!
//! The models approximate device behaviour with a power-law recurrence; they are
//! not circuit-accurate.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod array;
pub mod error;
pub mod models;
pub mod params;

pub use array::{DeviceArray, History, HistoryKind, HistoryRecord};
pub use error::{DeviceError, Result};
pub use models::{
    Device, DeviceModel, DifferentialMemristor, Memristor, PowerLawCell, PowerLawMemristor,
    PulseMode, StateKind,
};
pub use params::{DeviceParameters, ERROR_THRESHOLD, EXPONENT, GAIN, R_MAX, R_MIN};
