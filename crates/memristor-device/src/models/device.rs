// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime-selectable device model

use core::str::FromStr;

use rand::Rng;

use super::differential::DifferentialMemristor;
use super::power_law::PowerLawMemristor;
use super::traits::{Memristor, PulseMode, StateKind};
use crate::error::DeviceError;
use crate::params::DeviceParameters;

/// Names accepted in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceModel {
    #[default]
    PowerLaw,
    Differential,
}

impl DeviceModel {
    /// Build a device of this model with a random initial state
    pub fn fabricate<R: Rng + ?Sized>(self, params: DeviceParameters, rng: &mut R) -> Device {
        match self {
            DeviceModel::PowerLaw => Device::PowerLaw(PowerLawMemristor::fabricate(params, rng)),
            DeviceModel::Differential => {
                Device::Differential(DifferentialMemristor::fabricate(params, rng))
            }
        }
    }
}

impl FromStr for DeviceModel {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "power_law" => Ok(DeviceModel::PowerLaw),
            "differential" => Ok(DeviceModel::Differential),
            _ => Err(DeviceError::InvalidModel(s.to_string())),
        }
    }
}

/// Either memristor model behind one concrete type
#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    PowerLaw(PowerLawMemristor),
    Differential(DifferentialMemristor),
}

impl Memristor for Device {
    fn model_name(&self) -> &'static str {
        match self {
            Device::PowerLaw(m) => m.model_name(),
            Device::Differential(m) => m.model_name(),
        }
    }

    /// Defaults to the single power-law model
    fn fabricate<R: Rng + ?Sized>(params: DeviceParameters, rng: &mut R) -> Self {
        DeviceModel::default().fabricate(params, rng)
    }

    #[inline]
    fn pulse(&mut self, update: f64, mode: PulseMode) -> f64 {
        match self {
            Device::PowerLaw(m) => m.pulse(update, mode),
            Device::Differential(m) => m.pulse(update, mode),
        }
    }

    #[inline]
    fn get_state(&self, kind: StateKind, scaled: bool) -> f64 {
        match self {
            Device::PowerLaw(m) => m.get_state(kind, scaled),
            Device::Differential(m) => m.get_state(kind, scaled),
        }
    }

    fn cell_resistances(&self) -> Vec<f64> {
        match self {
            Device::PowerLaw(m) => m.cell_resistances(),
            Device::Differential(m) => m.cell_resistances(),
        }
    }

    fn save_state(&mut self) {
        match self {
            Device::PowerLaw(m) => m.save_state(),
            Device::Differential(m) => m.save_state(),
        }
    }

    fn history(&self) -> &[f64] {
        match self {
            Device::PowerLaw(m) => m.history(),
            Device::Differential(m) => m.history(),
        }
    }
}
