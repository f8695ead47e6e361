// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for device and device-array operations

/// Errors raised by memristor models and the device array
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeviceError {
    #[error("Invalid pulse mode '{0}' (expected 'same' or 'inverse')")]
    InvalidMode(String),

    #[error("Invalid state kind '{0}' (expected 'resistance' or 'conductance')")]
    InvalidStateKind(String),

    #[error("Invalid device model '{0}' (expected 'power_law' or 'differential')")]
    InvalidModel(String),

    #[error("Unknown history selector '{0}' (expected 'weight' or 'error')")]
    UnknownHistory(String),

    #[error("Invalid device parameters: {0}")]
    InvalidParameters(String),

    #[error("Device array must have at least one row and one column, got {rows}x{cols}")]
    EmptyArray { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} device array")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = core::result::Result<T, DeviceError>;
