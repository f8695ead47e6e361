// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device array: a grid of memristors and the weight matrix that mirrors them
//!
//! `weights[[j, i]]` is the scaled conductance of the device connecting input
//! `i` to output `j`. [`DeviceArray::pulse_cell`] is the only way to change a
//! device, and it rewrites the matching weight in the same call, so the matrix
//! never drifts from the devices.

use core::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::{DeviceError, Result};
use crate::models::{Memristor, PulseMode};
use crate::params::DeviceParameters;

/// Selector for the recorded histories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Weight,
    Error,
}

impl FromStr for HistoryKind {
    type Err = DeviceError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "weight" => Ok(HistoryKind::Weight),
            "error" => Ok(HistoryKind::Error),
            other => Err(DeviceError::UnknownHistory(other.to_string())),
        }
    }
}

/// Borrowed view of one history buffer
#[derive(Debug, Clone, Copy)]
pub enum History<'a> {
    Weight(&'a [Array2<f64>]),
    Error(&'a [Array1<f64>]),
}

impl History<'_> {
    pub fn len(&self) -> usize {
        match self {
            History::Weight(h) => h.len(),
            History::Error(h) => h.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned copy of everything recorded during a run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryRecord {
    pub times: Vec<f64>,
    pub weights: Vec<Array2<f64>>,
    pub errors: Vec<Array1<f64>>,
}

/// Grid of `output_size x input_size` memristors plus their weight cache
#[derive(Debug, Clone)]
pub struct DeviceArray<M> {
    devices: Array2<M>,
    weights: Array2<f64>,
    snapshot_times: Vec<f64>,
    weight_history: Vec<Array2<f64>>,
    error_history: Vec<Array1<f64>>,
}

impl<M: Memristor> DeviceArray<M> {
    /// Build an array by calling `factory(j, i)` for every cell in row-major order
    pub fn new<F>(output_size: usize, input_size: usize, factory: F) -> Result<Self>
    where
        F: FnMut((usize, usize)) -> M,
    {
        if output_size == 0 || input_size == 0 {
            return Err(DeviceError::EmptyArray {
                rows: output_size,
                cols: input_size,
            });
        }

        let devices = Array2::from_shape_fn((output_size, input_size), factory);
        let weights = devices.map(|device| device.weight());

        info!(
            "Created {}x{} device array ({})",
            output_size,
            input_size,
            devices[[0, 0]].model_name()
        );

        Ok(Self {
            devices,
            weights,
            snapshot_times: Vec::new(),
            weight_history: Vec::new(),
            error_history: Vec::new(),
        })
    }

    /// Build an array of freshly fabricated devices from a seeded RNG
    ///
    /// The same seed always yields the same initial resistances.
    pub fn fabricate(
        output_size: usize,
        input_size: usize,
        params: DeviceParameters,
        seed: u64,
    ) -> Result<Self> {
        params.validate()?;
        debug!("Fabricating devices with seed {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(output_size, input_size, |_| M::fabricate(params, &mut rng))
    }

    /// `(output_size, input_size)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.weights.dim()
    }

    #[inline]
    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Pulse device `(j, i)` and store its new scaled conductance in `W[j, i]`
    pub fn pulse_cell(&mut self, j: usize, i: usize, update: f64, mode: PulseMode) -> Result<f64> {
        let (rows, cols) = self.shape();
        let device = self
            .devices
            .get_mut([j, i])
            .ok_or(DeviceError::CellOutOfBounds {
                row: j,
                col: i,
                rows,
                cols,
            })?;

        let weight = device.pulse(update, mode);
        self.weights[[j, i]] = weight;
        Ok(weight)
    }

    /// Read-only view of the weight matrix
    #[inline]
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    /// `W · input`
    pub fn output(&self, input: ArrayView1<'_, f64>) -> Array1<f64> {
        self.weights.dot(&input)
    }

    pub fn device(&self, j: usize, i: usize) -> Option<&M> {
        self.devices.get([j, i])
    }

    /// Read-only view of the device grid
    pub fn devices(&self) -> ArrayView2<'_, M> {
        self.devices.view()
    }

    /// All devices flattened in row-major order
    pub fn components(&self) -> Vec<&M> {
        self.devices.iter().collect()
    }

    /// Record `W`, the optional error signal and every device's resistance
    pub fn snapshot(&mut self, time: f64, error: Option<&Array1<f64>>) {
        self.snapshot_times.push(time);
        self.weight_history.push(self.weights.clone());
        if let Some(err) = error {
            self.error_history.push(err.clone());
        }
        for device in self.devices.iter_mut() {
            device.save_state();
        }
    }

    pub fn weight_history(&self) -> &[Array2<f64>] {
        &self.weight_history
    }

    pub fn error_history(&self) -> &[Array1<f64>] {
        &self.error_history
    }

    /// Simulation times of the recorded snapshots
    pub fn snapshot_times(&self) -> &[f64] {
        &self.snapshot_times
    }

    pub fn history(&self, kind: HistoryKind) -> History<'_> {
        match kind {
            HistoryKind::Weight => History::Weight(&self.weight_history),
            HistoryKind::Error => History::Error(&self.error_history),
        }
    }

    /// Weights as they were after the last snapshot taken at or before `time`
    pub fn weights_at(&self, time: f64) -> Option<&Array2<f64>> {
        let idx = self.snapshot_times.partition_point(|&t| t <= time);
        idx.checked_sub(1).map(|i| &self.weight_history[i])
    }

    pub fn history_record(&self) -> HistoryRecord {
        HistoryRecord {
            times: self.snapshot_times.clone(),
            weights: self.weight_history.clone(),
            errors: self.error_history.clone(),
        }
    }
}
