// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Power-law memristor
//!
//! A single device whose resistance follows a fitted power law in the number
//! of applied pulses. Potentiating pulses drive the resistance towards `r_min`
//! with diminishing returns; depressing pulses walk the same curve backwards
//! and saturate at `r_max`.

use rand::Rng;

use super::traits::{Memristor, PulseMode, StateKind};
use crate::params::DeviceParameters;

/// One resistive element following the power-law update
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawCell {
    resistance: f64,
    params: DeviceParameters,
}

impl PowerLawCell {
    /// Create a cell at `resistance`, clamped into the valid range
    pub fn new(resistance: f64, params: DeviceParameters) -> Self {
        Self {
            resistance: params.clamp_resistance(resistance),
            params,
        }
    }

    /// Create a cell with a resistance drawn uniformly from the initial range
    pub fn random<R: Rng + ?Sized>(params: DeviceParameters, rng: &mut R) -> Self {
        let resistance = if params.initial_resistance_max > params.initial_resistance_min {
            rng.gen_range(params.initial_resistance_min..params.initial_resistance_max)
        } else {
            params.initial_resistance_min
        };
        Self::new(resistance, params)
    }

    #[inline]
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    #[inline]
    pub fn params(&self) -> &DeviceParameters {
        &self.params
    }

    /// Fitted pulse counter `n = ((R - r_min) / r_max)^(1/a)`
    ///
    /// `R = r_min + r_max × n^a` holds exactly, so one pulse is `n → n + 1`.
    ///
    /// At `R == r_min` (or close enough that `base^(1/a)` overflows) the
    /// counter is infinite. A finite pulse count cannot bring it back, so a
    /// cell driven to `r_min` stays there and later depressing pulses have
    /// no effect.
    #[inline]
    pub fn pulse_number(&self) -> f64 {
        let p = &self.params;
        let base = ((self.resistance - p.r_min) / p.r_max).max(0.0);
        base.powf(1.0 / p.exponent)
    }

    /// Advance the counter by `count` pulses and return the new resistance
    pub fn apply_pulses(&mut self, count: f64) -> f64 {
        if count == 0.0 || !count.is_finite() {
            return self.resistance;
        }

        let p = &self.params;
        let shifted = self.pulse_number() + count;
        let updated = if shifted <= 0.0 {
            p.r_max
        } else {
            p.r_min + p.r_max * shifted.powf(p.exponent)
        };

        self.resistance = p.clamp_resistance(updated);
        self.resistance
    }

    #[inline]
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    #[inline]
    pub fn scaled_conductance(&self) -> f64 {
        self.params.scale_conductance(self.resistance)
    }
}

/// Single power-law device; weight is its scaled conductance
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawMemristor {
    cell: PowerLawCell,
    history: Vec<f64>,
}

impl PowerLawMemristor {
    pub fn new(resistance: f64, params: DeviceParameters) -> Self {
        Self {
            cell: PowerLawCell::new(resistance, params),
            history: Vec::new(),
        }
    }

    pub fn cell(&self) -> &PowerLawCell {
        &self.cell
    }
}

impl Memristor for PowerLawMemristor {
    fn model_name(&self) -> &'static str {
        "Power-law memristor"
    }

    fn fabricate<R: Rng + ?Sized>(params: DeviceParameters, rng: &mut R) -> Self {
        Self {
            cell: PowerLawCell::random(params, rng),
            history: Vec::new(),
        }
    }

    fn pulse(&mut self, update: f64, mode: PulseMode) -> f64 {
        self.cell.apply_pulses(mode.pulse_count(update));
        self.cell.scaled_conductance()
    }

    fn get_state(&self, kind: StateKind, scaled: bool) -> f64 {
        match (kind, scaled) {
            (StateKind::Resistance, _) => self.cell.resistance(),
            (StateKind::Conductance, false) => self.cell.conductance(),
            (StateKind::Conductance, true) => self.cell.scaled_conductance(),
        }
    }

    fn cell_resistances(&self) -> Vec<f64> {
        vec![self.cell.resistance()]
    }

    fn save_state(&mut self) {
        self.history.push(self.cell.resistance());
    }

    fn history(&self) -> &[f64] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{R_MAX, R_MIN};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn device(resistance: f64) -> PowerLawMemristor {
        PowerLawMemristor::new(resistance, DeviceParameters::default())
    }

    #[test]
    fn test_pulse_number_round_trips_resistance() {
        let cell = PowerLawCell::new(1.05e8, DeviceParameters::default());
        let p = cell.params();
        let rebuilt = p.r_min + p.r_max * cell.pulse_number().powf(p.exponent);
        assert!((rebuilt - 1.05e8).abs() / 1.05e8 < 1e-9);
    }

    #[test]
    fn test_positive_pulse_lowers_resistance() {
        let mut mem = device(1.05e8);
        let before = mem.get_state(StateKind::Resistance, false);
        let weight_before = mem.weight();

        let weight = mem.pulse(0.3, PulseMode::Same);

        assert!(mem.get_state(StateKind::Resistance, false) < before);
        assert!(weight > weight_before);
        assert_eq!(weight, mem.weight());
    }

    #[test]
    fn test_negative_pulse_raises_resistance() {
        let mut mem = device(1.05e8);
        let before = mem.get_state(StateKind::Resistance, false);
        mem.pulse(-0.3, PulseMode::Same);
        assert!(mem.get_state(StateKind::Resistance, false) > before);
    }

    #[test]
    fn test_same_mode_ignores_magnitude() {
        let mut small = device(1.05e8);
        let mut large = device(1.05e8);
        small.pulse(1e-9, PulseMode::Same);
        large.pulse(1e9, PulseMode::Same);
        assert_eq!(small, large);
    }

    #[test]
    fn test_inverse_mode_scales_with_magnitude() {
        let start = 1.05e8;
        let mut small = device(start);
        let mut large = device(start);
        small.pulse(-1.0, PulseMode::Inverse);
        large.pulse(-10.0, PulseMode::Inverse);

        let small_drop = start - small.get_state(StateKind::Resistance, false);
        let large_drop = start - large.get_state(StateKind::Resistance, false);
        assert!(small_drop > 0.0);
        assert!(large_drop > small_drop);
    }

    #[test]
    fn test_inverse_mode_flips_polarity() {
        let mut mem = device(1.05e8);
        let before = mem.weight();
        mem.pulse(2.0, PulseMode::Inverse);
        assert!(mem.weight() < before);
    }

    #[test]
    fn test_zero_update_is_noop() {
        let mut mem = device(1.05e8);
        let before = mem.clone();
        mem.pulse(0.0, PulseMode::Same);
        mem.pulse(0.0, PulseMode::Inverse);
        assert_eq!(mem, before);
    }

    #[test]
    fn test_saturates_at_bounds() {
        let mut mem = device(1.05e8);
        for _ in 0..50 {
            mem.pulse(1e12, PulseMode::Inverse);
        }
        assert_eq!(mem.get_state(StateKind::Resistance, false), R_MAX);

        let mut mem = device(1.05e8);
        mem.pulse(-1e300, PulseMode::Inverse);
        let r = mem.get_state(StateKind::Resistance, false);
        assert!(r >= R_MIN && r <= R_MAX);
    }

    #[test]
    fn test_cell_at_r_min_does_not_recover() {
        let mut cell = PowerLawCell::new(R_MIN, DeviceParameters::default());
        assert!(cell.pulse_number().is_infinite());

        assert_eq!(cell.apply_pulses(-5.0), R_MIN);
        assert_eq!(cell.apply_pulses(-1e6), R_MIN);
        assert_eq!(cell.apply_pulses(3.0), R_MIN);
    }

    #[test]
    fn test_raw_conductance_is_reciprocal() {
        let mem = device(2e7);
        let g = mem.get_state(StateKind::Conductance, false);
        assert!((g - 1.0 / 2e7).abs() < 1e-18);
    }

    #[test]
    fn test_fabricate_within_initial_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = DeviceParameters::default();
        for _ in 0..100 {
            let mem = PowerLawMemristor::fabricate(params, &mut rng);
            let r = mem.get_state(StateKind::Resistance, false);
            assert!(r >= params.initial_resistance_min && r < params.initial_resistance_max);
        }
    }

    #[test]
    fn test_history_records_resistance() {
        let mut mem = device(1.05e8);
        mem.save_state();
        mem.pulse(1.0, PulseMode::Same);
        mem.save_state();
        assert_eq!(mem.history().len(), 2);
        assert!(mem.history()[1] < mem.history()[0]);
    }
}
