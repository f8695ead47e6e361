// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for learning rules and the controller

use memristor_device::DeviceError;

#[derive(Debug, thiserror::Error)]
pub enum PlasticityError {
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Time must strictly increase: previous step at {previous}, got {current}")]
    NonMonotonicTime { previous: f64, current: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown learning rule '{0}' (expected 'oja', 'bcm' or 'pes')")]
    UnknownRule(String),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] memristor_config::ConfigError),
}

pub type Result<T> = core::result::Result<T, PlasticityError>;

/// Fail with `ShapeMismatch` unless `actual == expected`
#[inline]
pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(PlasticityError::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
