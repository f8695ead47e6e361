// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Memristor controller
//!
//! Binds one device array to one learning rule and exposes the per-timestep
//! entry point the host simulator calls:
//!
//! ```text
//! (time, activities) -> rule.apply(time, activities, &mut array) -> W · pre
//!                       └── if logging: array.snapshot(time, rule.error_signal())
//! ```
//!
//! The controller owns the array and lends it to the rule for the duration of
//! each call. Nothing else can mutate the devices or the weight matrix. A
//! controller is not meant to be shared between threads without external
//! synchronisation.

use memristor_device::{
    DeviceArray, DeviceParameters, History, HistoryKind, HistoryRecord, Memristor,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::{info, trace};

use crate::error::{ensure_len, PlasticityError, Result};
use crate::rules::{check_positive, LearningRule, DEFAULT_DT};

/// Shape and run options fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Number of presynaptic neurons (array columns)
    pub in_size: usize,
    /// Number of postsynaptic neurons (array rows)
    pub out_size: usize,
    /// `(pre_dimensions, post_dimensions)` of the represented signals
    pub dimensions: (usize, usize),
    /// Simulation step (seconds); the bound rule must use the same step
    pub dt: f64,
    /// Record weight/error history after every step
    pub logging: bool,
    /// Seed for device fabrication
    pub seed: u64,
}

impl ControllerConfig {
    pub fn new(in_size: usize, out_size: usize) -> Self {
        Self {
            in_size,
            out_size,
            dimensions: (1, 1),
            dt: DEFAULT_DT,
            logging: true,
            seed: 0,
        }
    }

    pub fn with_dimensions(mut self, pre: usize, post: usize) -> Self {
        self.dimensions = (pre, post);
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.in_size == 0 || self.out_size == 0 {
            return Err(PlasticityError::InvalidParameter(format!(
                "in_size and out_size must be positive, got {}x{}",
                self.out_size, self.in_size
            )));
        }
        if self.dimensions.0 == 0 || self.dimensions.1 == 0 {
            return Err(PlasticityError::InvalidParameter(format!(
                "dimensions must be positive, got {:?}",
                self.dimensions
            )));
        }
        check_positive("dt", self.dt)
    }
}

/// One device array driven by one learning rule
#[derive(Debug)]
pub struct MemristorController<M, R> {
    array: DeviceArray<M>,
    rule: R,
    config: ControllerConfig,
    last_time: Option<f64>,
    steps: u64,
}

impl<M: Memristor, R: LearningRule> MemristorController<M, R> {
    /// Fabricate a seeded array of `M` devices and bind `rule` to it
    pub fn new(rule: R, config: ControllerConfig, params: DeviceParameters) -> Result<Self> {
        config.validate()?;
        let array = DeviceArray::fabricate(config.out_size, config.in_size, params, config.seed)?;
        Self::bind(array, rule, config)
    }

    /// Build the array with `factory(j, i)` instead of fabricating it
    pub fn with_factory<F>(factory: F, rule: R, config: ControllerConfig) -> Result<Self>
    where
        F: FnMut((usize, usize)) -> M,
    {
        config.validate()?;
        let array = DeviceArray::new(config.out_size, config.in_size, factory)?;
        Self::bind(array, rule, config)
    }

    fn bind(array: DeviceArray<M>, rule: R, config: ControllerConfig) -> Result<Self> {
        rule.validate(config.in_size, config.out_size)?;
        if rule.dt() != config.dt {
            return Err(PlasticityError::InvalidParameter(format!(
                "{} rule steps with dt={} but the controller runs at dt={}",
                rule.name(),
                rule.dt(),
                config.dt
            )));
        }
        if let Some(error_dims) = rule.error_dimensions() {
            ensure_len("post dimensions", config.dimensions.1, error_dims)?;
        }

        info!(
            "Memristor controller ready: {} rule on {}x{} array (logging={})",
            rule.name(),
            config.out_size,
            config.in_size,
            config.logging
        );

        Ok(Self {
            array,
            rule,
            config,
            last_time: None,
            steps: 0,
        })
    }

    /// Advance one timestep and return the output vector
    ///
    /// `time` must be strictly greater than on the previous call.
    pub fn step(&mut self, time: f64, activities: &[f64]) -> Result<Array1<f64>> {
        if let Some(previous) = self.last_time {
            if !(time > previous) {
                return Err(PlasticityError::NonMonotonicTime {
                    previous,
                    current: time,
                });
            }
        }

        let output = self
            .rule
            .apply(time, ArrayView1::from(activities), &mut self.array)?;
        self.last_time = Some(time);
        self.steps += 1;

        if self.config.logging {
            self.array.snapshot(time, self.rule.error_signal());
        }
        trace!("step {} at t={:.4}", self.steps, time);

        Ok(output)
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.array.weights()
    }

    pub fn array(&self) -> &DeviceArray<M> {
        &self.array
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// `(output_size, input_size)`
    pub fn shape(&self) -> (usize, usize) {
        self.array.shape()
    }

    /// Expected activity vector length
    pub fn activity_len(&self) -> usize {
        self.rule.activity_len(self.config.in_size, self.config.out_size)
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn components(&self) -> Vec<&M> {
        self.array.components()
    }

    /// History keyed by `"weight"` or `"error"`
    pub fn history(&self, select: &str) -> Result<History<'_>> {
        let kind: HistoryKind = select.parse()?;
        Ok(self.array.history(kind))
    }

    pub fn weights_at(&self, time: f64) -> Option<&Array2<f64>> {
        self.array.weights_at(time)
    }

    pub fn history_record(&self) -> HistoryRecord {
        self.array.history_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{default_encoders, Oja, Pes};
    use memristor_device::{PowerLawMemristor, StateKind};

    fn oja_controller(logging: bool) -> MemristorController<PowerLawMemristor, Oja> {
        let config = ControllerConfig::new(2, 2).with_logging(logging).with_seed(11);
        MemristorController::new(Oja::default(), config, DeviceParameters::default()).unwrap()
    }

    #[test]
    fn test_rejects_non_increasing_time() {
        let mut controller = oja_controller(false);
        controller.step(0.001, &[0.0; 4]).unwrap();

        assert!(matches!(
            controller.step(0.001, &[0.0; 4]),
            Err(PlasticityError::NonMonotonicTime { .. })
        ));
        assert!(matches!(
            controller.step(0.0005, &[0.0; 4]),
            Err(PlasticityError::NonMonotonicTime { .. })
        ));
        assert_eq!(controller.steps(), 1);
    }

    #[test]
    fn test_logging_records_every_step() {
        let mut controller = oja_controller(true);
        for k in 1..=3 {
            controller.step(k as f64 * 0.001, &[1.0, 0.0, 1.0, 0.0]).unwrap();
        }
        assert_eq!(controller.history("weight").unwrap().len(), 3);
        assert!(controller.history("error").unwrap().is_empty());
        assert_eq!(controller.components()[0].history().len(), 3);
    }

    #[test]
    fn test_logging_disabled_records_nothing() {
        let mut controller = oja_controller(false);
        controller.step(0.001, &[1.0, 0.0, 1.0, 0.0]).unwrap();
        assert!(controller.history("weight").unwrap().is_empty());
        assert!(controller.weights_at(1.0).is_none());
    }

    #[test]
    fn test_unknown_history_selector() {
        let controller = oja_controller(true);
        assert!(matches!(
            controller.history("resistance"),
            Err(PlasticityError::Device(_))
        ));
    }

    #[test]
    fn test_pes_post_dimensions_must_match_encoders() {
        let config = ControllerConfig::new(2, 2).with_dimensions(1, 3);
        let rule = Pes::with_encoders(default_encoders(2, 1)).unwrap();
        let result: Result<MemristorController<PowerLawMemristor, Pes>> =
            MemristorController::new(rule, config, DeviceParameters::default());
        assert!(matches!(result, Err(PlasticityError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_with_factory_uses_given_devices() {
        let config = ControllerConfig::new(3, 2);
        let controller = MemristorController::with_factory(
            |(j, i)| PowerLawMemristor::new(1e6 * (1 + j * 3 + i) as f64, DeviceParameters::default()),
            Oja::default(),
            config,
        )
        .unwrap();

        assert_eq!(controller.shape(), (2, 3));
        let r = controller.array().device(1, 2).unwrap().get_state(StateKind::Resistance, false);
        assert_eq!(r, 6e6);
        assert_eq!(controller.activity_len(), 5);
    }

    #[test]
    fn test_rule_dt_must_match_controller_dt() {
        let rule = Pes::new(default_encoders(2, 1), 1e-5, 0.001).unwrap();
        let config = ControllerConfig::new(2, 2).with_dt(0.5);
        let result: Result<MemristorController<PowerLawMemristor, Pes>> =
            MemristorController::new(rule, config, DeviceParameters::default());
        assert!(matches!(result, Err(PlasticityError::InvalidParameter(_))));

        let rule = Pes::new(default_encoders(2, 1), 1e-5, 0.5).unwrap();
        let config = ControllerConfig::new(2, 2).with_dt(0.5);
        let controller: MemristorController<PowerLawMemristor, Pes> =
            MemristorController::new(rule, config, DeviceParameters::default()).unwrap();
        assert_eq!(controller.rule().dt(), controller.config().dt);
    }

    #[test]
    fn test_invalid_config() {
        let config = ControllerConfig::new(0, 2);
        assert!(config.validate().is_err());
        let config = ControllerConfig::new(2, 2).with_dt(0.0);
        assert!(config.validate().is_err());
        let config = ControllerConfig::new(2, 2).with_dimensions(0, 1);
        assert!(config.validate().is_err());
    }
}
