// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Oja rule on memristors
//!
//! ```text
//! α = learning_rate × dt
//! target[j, i] = α × post[j] × pre[i] − β × W[j, i] × α × post[j]²
//! ```
//!
//! The Hebbian term strengthens correlated pairs while the forgetting term,
//! proportional to the current weight and the squared postsynaptic activity,
//! keeps weights bounded. Only the sign of the target reaches the device.

use memristor_device::{DeviceArray, Memristor, PulseMode};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use tracing::trace;

use super::{check_positive, LearningRule, DEFAULT_DT};
use crate::error::{ensure_len, Result};
use crate::spikes::SpikeGate;

#[derive(Debug, Clone, PartialEq)]
pub struct Oja {
    learning_rate: f64,
    dt: f64,
    beta: f64,
}

impl Oja {
    pub fn new(learning_rate: f64, dt: f64, beta: f64) -> Result<Self> {
        check_positive("learning_rate", learning_rate)?;
        check_positive("dt", dt)?;
        if !beta.is_finite() {
            return Err(crate::PlasticityError::InvalidParameter(format!(
                "beta must be finite, got {}",
                beta
            )));
        }
        Ok(Self {
            learning_rate,
            dt,
            beta,
        })
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.learning_rate * self.dt
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Unclamped per-cell update for the current activities and weights
    pub fn update_targets(
        &self,
        pre: ArrayView1<'_, f64>,
        post: ArrayView1<'_, f64>,
        weights: ArrayView2<'_, f64>,
    ) -> Array2<f64> {
        let alpha = self.alpha();
        Array2::from_shape_fn(weights.dim(), |(j, i)| {
            let hebbian = alpha * post[j] * pre[i];
            let forgetting = self.beta * weights[[j, i]] * alpha * post[j] * post[j];
            hebbian - forgetting
        })
    }
}

impl Default for Oja {
    fn default() -> Self {
        Self {
            learning_rate: 1e-6,
            dt: DEFAULT_DT,
            beta: 1.0,
        }
    }
}

impl LearningRule for Oja {
    fn name(&self) -> &'static str {
        "Oja"
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn activity_len(&self, input_size: usize, output_size: usize) -> usize {
        input_size + output_size
    }

    fn apply<M: Memristor>(
        &mut self,
        time: f64,
        activities: ArrayView1<'_, f64>,
        array: &mut DeviceArray<M>,
    ) -> Result<Array1<f64>> {
        let (output_size, input_size) = array.shape();
        ensure_len(
            "Oja activity vector",
            self.activity_len(input_size, output_size),
            activities.len(),
        )?;

        let pre = activities.slice(s![..input_size]);
        let post = activities.slice(s![input_size..input_size + output_size]);

        let targets = self.update_targets(pre, post, array.weights());
        let gate = SpikeGate::coincident(pre, post);

        for (j, i) in gate.eligible() {
            array.pulse_cell(j, i, targets[[j, i]], PulseMode::Same)?;
        }
        trace!("t={:.4} Oja pulsed {} cells", time, gate.count());

        Ok(array.output(pre))
    }
}
