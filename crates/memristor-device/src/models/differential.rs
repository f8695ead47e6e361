// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Differential memristor pair
//!
//! Two power-law cells wired as a positive and a negative branch so the
//! synapse can carry a signed weight:
//!
//! ```text
//! w = scaled(R_pos) - scaled(R_neg)
//! ```
//!
//! Both branches only ever receive potentiating pulses. A positive pulse count
//! potentiates the positive branch, a negative count potentiates the negative
//! branch by the same number of pulses.

use rand::Rng;

use super::power_law::PowerLawCell;
use super::traits::{Memristor, PulseMode, StateKind};
use crate::params::DeviceParameters;

#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialMemristor {
    positive: PowerLawCell,
    negative: PowerLawCell,
    history: Vec<f64>,
}

impl DifferentialMemristor {
    pub fn new(positive: f64, negative: f64, params: DeviceParameters) -> Self {
        Self {
            positive: PowerLawCell::new(positive, params),
            negative: PowerLawCell::new(negative, params),
            history: Vec::new(),
        }
    }

    pub fn positive(&self) -> &PowerLawCell {
        &self.positive
    }

    pub fn negative(&self) -> &PowerLawCell {
        &self.negative
    }
}

impl Memristor for DifferentialMemristor {
    fn model_name(&self) -> &'static str {
        "Differential memristor pair"
    }

    fn fabricate<R: Rng + ?Sized>(params: DeviceParameters, rng: &mut R) -> Self {
        let positive = PowerLawCell::random(params, rng);
        let negative = PowerLawCell::random(params, rng);
        Self {
            positive,
            negative,
            history: Vec::new(),
        }
    }

    fn pulse(&mut self, update: f64, mode: PulseMode) -> f64 {
        let count = mode.pulse_count(update);
        if count > 0.0 {
            self.positive.apply_pulses(count);
        } else if count < 0.0 {
            self.negative.apply_pulses(-count);
        }
        self.weight()
    }

    fn get_state(&self, kind: StateKind, scaled: bool) -> f64 {
        match (kind, scaled) {
            // Parallel combination of both branches
            (StateKind::Resistance, _) => {
                1.0 / (self.positive.conductance() + self.negative.conductance())
            }
            (StateKind::Conductance, false) => {
                self.positive.conductance() - self.negative.conductance()
            }
            (StateKind::Conductance, true) => {
                self.positive.scaled_conductance() - self.negative.scaled_conductance()
            }
        }
    }

    fn cell_resistances(&self) -> Vec<f64> {
        vec![self.positive.resistance(), self.negative.resistance()]
    }

    fn save_state(&mut self) {
        let resistance = self.get_state(StateKind::Resistance, false);
        self.history.push(resistance);
    }

    fn history(&self) -> &[f64] {
        &self.history
    }
}
