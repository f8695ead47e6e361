// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Physical constants and per-model parameters for power-law memristors
//!
//! ```text
//! Internal pulse counter:
//!     n = ((R - r_min) / r_max)^(1/a)
//!
//! Resistance after k pulses:
//!     R = r_min + r_max × (n + k + 1)^a       (a < 0)
//!
//! Scaled conductance (the synaptic weight):
//!     w = (1/R - g_min) / (g_max - g_min) × gain
//!     g_min = 1/r_max, g_max = 1/r_min
//! ```

use crate::error::{DeviceError, Result};

/// Lowest reachable resistance (Ω)
pub const R_MIN: f64 = 1e2;
/// Highest reachable resistance (Ω)
pub const R_MAX: f64 = 2.5e8;
/// Power-law shape exponent fitted to device measurements
pub const EXPONENT: f64 = -0.1;
/// Scale applied to normalised conductance
pub const GAIN: f64 = 1e5;
/// Supervised error components at or below this magnitude are treated as zero
pub const ERROR_THRESHOLD: f64 = 1e-5;
/// Default range of freshly fabricated device resistances (Ω)
pub const INITIAL_RESISTANCE: (f64, f64) = (1e8, 1.1e8);

/// Parameters shared by every cell of a power-law memristor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceParameters {
    pub r_min: f64,
    pub r_max: f64,
    /// Shape exponent `a`, must be negative
    pub exponent: f64,
    pub gain: f64,
    /// Lower bound of the uniform initial resistance draw
    pub initial_resistance_min: f64,
    /// Upper bound of the uniform initial resistance draw
    pub initial_resistance_max: f64,
}

impl DeviceParameters {
    /// Create parameters with the fitted default values
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn g_min(&self) -> f64 {
        1.0 / self.r_max
    }

    #[inline]
    pub fn g_max(&self) -> f64 {
        1.0 / self.r_min
    }

    /// Map a resistance onto the `[0, gain]` weight range
    #[inline]
    pub fn scale_conductance(&self, resistance: f64) -> f64 {
        let g_min = self.g_min();
        let range = self.g_max() - g_min;
        if range <= 0.0 {
            return 0.0;
        }
        (1.0 / resistance - g_min) / range * self.gain
    }

    #[inline]
    pub fn clamp_resistance(&self, resistance: f64) -> f64 {
        if resistance.is_nan() {
            return self.r_max;
        }
        resistance.clamp(self.r_min, self.r_max)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(DeviceError::InvalidParameters(msg));

        if !(self.r_min > 0.0) {
            return invalid(format!("r_min must be positive, got {}", self.r_min));
        }
        if !(self.r_max > self.r_min) {
            return invalid(format!(
                "r_max ({}) must exceed r_min ({})",
                self.r_max, self.r_min
            ));
        }
        if !(self.exponent < 0.0) {
            return invalid(format!("exponent must be negative, got {}", self.exponent));
        }
        if !(self.gain > 0.0) {
            return invalid(format!("gain must be positive, got {}", self.gain));
        }
        if self.initial_resistance_min > self.initial_resistance_max
            || self.initial_resistance_min < self.r_min
            || self.initial_resistance_max > self.r_max
        {
            return invalid(format!(
                "initial resistance range [{}, {}] must lie within [{}, {}]",
                self.initial_resistance_min, self.initial_resistance_max, self.r_min, self.r_max
            ));
        }
        Ok(())
    }
}

impl Default for DeviceParameters {
    fn default() -> Self {
        Self {
            r_min: R_MIN,
            r_max: R_MAX,
            exponent: EXPONENT,
            gain: GAIN,
            initial_resistance_min: INITIAL_RESISTANCE.0,
            initial_resistance_max: INITIAL_RESISTANCE.1,
        }
    }
}
