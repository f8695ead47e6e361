// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # PES (Prescribed Error Sensitivity) on memristors
//!
//! Supervised, error-driven rule:
//!
//! ```text
//! e          = error, with components |e_k| ≤ threshold forced to 0
//! α          = learning_rate × dt / input_size
//! local[j]   = α × (encoders · e)[j]
//! ```
//!
//! There is no postsynaptic spike signal, so every row of a column opens when
//! that column's presynaptic neuron spikes. Devices are pulsed in inverse mode:
//! the weight moves against the local error, proportionally to its size.

use memristor_device::{DeviceArray, Memristor, PulseMode, ERROR_THRESHOLD};
use ndarray::{s, Array1, Array2, ArrayView1};
use tracing::trace;

use super::{check_positive, LearningRule, DEFAULT_DT};
use crate::error::{ensure_len, PlasticityError, Result};
use crate::spikes::SpikeGate;

/// Encoders used when none are supplied: first half of the neurons `-1`,
/// the rest `+1`, on every dimension
pub fn default_encoders(n_neurons: usize, dimensions: usize) -> Array2<f64> {
    let negative = n_neurons / 2;
    Array2::from_shape_fn((n_neurons, dimensions), |(j, _)| {
        if j < negative {
            -1.0
        } else {
            1.0
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pes {
    learning_rate: f64,
    dt: f64,
    error_threshold: f64,
    /// `output_size x error_dimensions`
    encoders: Array2<f64>,
    last_error: Option<Array1<f64>>,
}

impl Pes {
    pub fn new(encoders: Array2<f64>, learning_rate: f64, dt: f64) -> Result<Self> {
        check_positive("learning_rate", learning_rate)?;
        check_positive("dt", dt)?;
        if encoders.is_empty() {
            return Err(PlasticityError::InvalidParameter(
                "PES encoders must not be empty".to_string(),
            ));
        }
        Ok(Self {
            learning_rate,
            dt,
            error_threshold: ERROR_THRESHOLD,
            encoders,
            last_error: None,
        })
    }

    /// PES with the default learning rate (`1e-5`) and step
    pub fn with_encoders(encoders: Array2<f64>) -> Result<Self> {
        Self::new(encoders, 1e-5, DEFAULT_DT)
    }

    /// Override the dead-zone below which error components count as zero
    pub fn with_error_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(PlasticityError::InvalidParameter(format!(
                "error_threshold must be a non-negative finite number, got {}",
                threshold
            )));
        }
        self.error_threshold = threshold;
        Ok(self)
    }

    pub fn encoders(&self) -> &Array2<f64> {
        &self.encoders
    }

    #[inline]
    pub fn alpha(&self, input_size: usize) -> f64 {
        self.learning_rate * self.dt / input_size as f64
    }

    /// Zero every component inside the dead-zone
    pub fn dead_zone(&self, error: ArrayView1<'_, f64>) -> Array1<f64> {
        let threshold = self.error_threshold;
        error.mapv(|e| if e.abs() > threshold { e } else { 0.0 })
    }

    /// Per-row error `α × (encoders · error)`
    pub fn local_error(&self, error: &Array1<f64>, input_size: usize) -> Array1<f64> {
        self.encoders.dot(error) * self.alpha(input_size)
    }
}

impl LearningRule for Pes {
    fn name(&self) -> &'static str {
        "PES"
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn activity_len(&self, input_size: usize, _output_size: usize) -> usize {
        input_size + self.encoders.ncols()
    }

    fn validate(&self, _input_size: usize, output_size: usize) -> Result<()> {
        ensure_len("PES encoder rows", output_size, self.encoders.nrows())
    }

    fn apply<M: Memristor>(
        &mut self,
        time: f64,
        activities: ArrayView1<'_, f64>,
        array: &mut DeviceArray<M>,
    ) -> Result<Array1<f64>> {
        let (output_size, input_size) = array.shape();
        self.validate(input_size, output_size)?;
        ensure_len(
            "PES activity vector",
            self.activity_len(input_size, output_size),
            activities.len(),
        )?;

        let pre = activities.slice(s![..input_size]);
        let error = self.dead_zone(activities.slice(s![input_size..]));
        let local_error = self.local_error(&error, input_size);
        self.last_error = Some(error);

        let gate = SpikeGate::presynaptic(pre, output_size);
        for (j, i) in gate.eligible() {
            array.pulse_cell(j, i, local_error[j], PulseMode::Inverse)?;
        }
        trace!("t={:.4} PES pulsed {} cells", time, gate.count());

        Ok(array.output(pre))
    }

    fn error_dimensions(&self) -> Option<usize> {
        Some(self.encoders.ncols())
    }

    fn error_signal(&self) -> Option<&Array1<f64>> {
        self.last_error.as_ref()
    }
}
