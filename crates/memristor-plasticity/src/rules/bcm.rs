// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # BCM rule on memristors
//!
//! ```text
//! α = learning_rate × dt
//! target[j] = α × post[j] × (post[j] − θ[j])
//! ```
//!
//! θ is the sliding modification threshold. It is filtered outside this crate
//! and arrives as the tail of the activity vector on every step. The same
//! target applies to every open cell of row `j`.

use memristor_device::{DeviceArray, Memristor, PulseMode};
use ndarray::{s, Array1, ArrayView1, Zip};
use tracing::trace;

use super::{check_positive, LearningRule, DEFAULT_DT};
use crate::error::{ensure_len, Result};
use crate::spikes::SpikeGate;

#[derive(Debug, Clone, PartialEq)]
pub struct Bcm {
    learning_rate: f64,
    dt: f64,
}

impl Bcm {
    pub fn new(learning_rate: f64, dt: f64) -> Result<Self> {
        check_positive("learning_rate", learning_rate)?;
        check_positive("dt", dt)?;
        Ok(Self { learning_rate, dt })
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.learning_rate * self.dt
    }

    /// Per-row update `α × post × (post − θ)`
    pub fn update_targets(
        &self,
        post: ArrayView1<'_, f64>,
        theta: ArrayView1<'_, f64>,
    ) -> Array1<f64> {
        let alpha = self.alpha();
        Zip::from(&post)
            .and(&theta)
            .map_collect(|&a, &th| alpha * a * (a - th))
    }
}

impl Default for Bcm {
    fn default() -> Self {
        Self {
            learning_rate: 1e-9,
            dt: DEFAULT_DT,
        }
    }
}

impl LearningRule for Bcm {
    fn name(&self) -> &'static str {
        "BCM"
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn activity_len(&self, input_size: usize, output_size: usize) -> usize {
        input_size + 2 * output_size
    }

    fn apply<M: Memristor>(
        &mut self,
        time: f64,
        activities: ArrayView1<'_, f64>,
        array: &mut DeviceArray<M>,
    ) -> Result<Array1<f64>> {
        let (output_size, input_size) = array.shape();
        ensure_len(
            "BCM activity vector",
            self.activity_len(input_size, output_size),
            activities.len(),
        )?;

        let pre = activities.slice(s![..input_size]);
        let post = activities.slice(s![input_size..input_size + output_size]);
        let theta = activities.slice(s![input_size + output_size..]);

        let targets = self.update_targets(post, theta);
        let gate = SpikeGate::coincident(pre, post);

        for (j, i) in gate.eligible() {
            array.pulse_cell(j, i, targets[j], PulseMode::Same)?;
        }
        trace!("t={:.4} BCM pulsed {} cells", time, gate.count());

        Ok(array.output(pre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memristor_device::{DeviceParameters, PowerLawMemristor};
    use ndarray::arr1;

    #[test]
    fn test_update_targets_sign_follows_threshold() {
        let rule = Bcm::new(1.0, 1.0).unwrap();
        let post = arr1(&[2.0, 2.0, 0.0]);
        let theta = arr1(&[1.0, 3.0, 1.0]);

        let targets = rule.update_targets(post.view(), theta.view());

        assert!((targets[0] - 2.0).abs() < 1e-12);
        assert!((targets[1] + 2.0).abs() < 1e-12);
        assert_eq!(targets[2], 0.0);
    }

    #[test]
    fn test_above_threshold_potentiates_row() {
        let mut rule = Bcm::default();
        let mut array: DeviceArray<PowerLawMemristor> =
            DeviceArray::fabricate(2, 2, DeviceParameters::default(), 9).unwrap();
        let before = array.weights().to_owned();

        // pre, post, theta
        let x = arr1(&[1.0, 1.0, 3.0, 1.0, 1.0, 5.0]);
        rule.apply(0.001, x.view(), &mut array).unwrap();

        // row 0: post above theta -> stronger; row 1: post below theta -> weaker
        assert!(array.weights()[[0, 0]] > before[[0, 0]]);
        assert!(array.weights()[[0, 1]] > before[[0, 1]]);
        assert!(array.weights()[[1, 0]] < before[[1, 0]]);
        assert!(array.weights()[[1, 1]] < before[[1, 1]]);
    }

    #[test]
    fn test_rejects_missing_theta() {
        let mut rule = Bcm::default();
        let mut array: DeviceArray<PowerLawMemristor> =
            DeviceArray::fabricate(2, 2, DeviceParameters::default(), 9).unwrap();
        let x = arr1(&[1.0, 1.0, 1.0, 1.0]);
        assert!(rule.apply(0.001, x.view(), &mut array).is_err());
    }
}
