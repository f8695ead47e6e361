// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Common interface for every memristor model

use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::error::DeviceError;
use crate::params::DeviceParameters;

/// How an update magnitude is turned into device pulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseMode {
    /// One unit pulse in the direction of the update's sign
    Same,
    /// `-update` pulses: opposite polarity, proportional to the magnitude
    Inverse,
}

impl PulseMode {
    /// Signed number of potentiating pulses for an update
    ///
    /// Positive counts raise conductance, negative counts lower it.
    #[inline]
    pub fn pulse_count(self, update: f64) -> f64 {
        if update == 0.0 || update.is_nan() {
            return 0.0;
        }
        match self {
            PulseMode::Same => update.signum(),
            PulseMode::Inverse => -update,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PulseMode::Same => "same",
            PulseMode::Inverse => "inverse",
        }
    }
}

impl FromStr for PulseMode {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same" => Ok(PulseMode::Same),
            "inverse" => Ok(PulseMode::Inverse),
            other => Err(DeviceError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for PulseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which physical quantity `get_state` reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Resistance,
    Conductance,
}

impl FromStr for StateKind {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resistance" => Ok(StateKind::Resistance),
            "conductance" => Ok(StateKind::Conductance),
            other => Err(DeviceError::InvalidStateKind(other.to_string())),
        }
    }
}

/// A simulated memristive synapse
///
/// Implementations own their resistance state and only change it through
/// [`Memristor::pulse`]. The value returned by `pulse` is always the same value
/// `get_state(StateKind::Conductance, true)` reports afterwards, so callers can
/// cache it as a weight.
pub trait Memristor: fmt::Debug + Send {
    /// Human-readable model name
    fn model_name(&self) -> &'static str;

    /// Create a device with a random initial resistance
    fn fabricate<R: Rng + ?Sized>(params: DeviceParameters, rng: &mut R) -> Self
    where
        Self: Sized;

    /// Apply an update and return the new scaled conductance
    fn pulse(&mut self, update: f64, mode: PulseMode) -> f64;

    /// Read the device state
    ///
    /// `scaled` only affects `Conductance`: it maps the raw value onto `[0, gain]`.
    fn get_state(&self, kind: StateKind, scaled: bool) -> f64;

    /// Scaled conductance, the value mirrored in the weight matrix
    #[inline]
    fn weight(&self) -> f64 {
        self.get_state(StateKind::Conductance, true)
    }

    /// Resistance of each internal cell, in a fixed order
    fn cell_resistances(&self) -> Vec<f64>;

    /// Append the current resistance to this device's history
    fn save_state(&mut self);

    /// Recorded resistances, one entry per `save_state` call
    fn history(&self) -> &[f64];
}
