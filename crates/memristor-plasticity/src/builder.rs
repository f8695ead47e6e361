// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Build a controller from a loaded `MemristorConfig`
//!
//! Device model and rule are picked at runtime from their configured names,
//! so the result is always `MemristorController<Device, Rule>`.

use memristor_config::{validate_config, MemristorConfig};
use memristor_device::{Device, DeviceModel, DeviceParameters};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::controller::{ControllerConfig, MemristorController};
use crate::error::{PlasticityError, Result};
use crate::rules::{default_encoders, Bcm, Oja, Pes, Rule, RuleKind};

const OJA_LEARNING_RATE: f64 = 1e-6;
const BCM_LEARNING_RATE: f64 = 1e-9;
const PES_LEARNING_RATE: f64 = 1e-5;

/// Validate `config` and build a ready-to-step controller
pub fn from_config(config: &MemristorConfig) -> Result<MemristorController<Device, Rule>> {
    validate_config(config)?;

    let model: DeviceModel = config.device.model.parse()?;
    let params = device_parameters(config);
    params.validate()?;

    let rule = build_rule(config)?;
    let controller_config = ControllerConfig::new(config.network.in_size, config.network.out_size)
        .with_dimensions(config.network.pre_dimensions, config.network.post_dimensions)
        .with_dt(config.simulation.dt)
        .with_logging(config.simulation.logging)
        .with_seed(config.simulation.seed);

    debug!(
        "Building {:?} controller with {:?} devices, seed {}",
        rule.kind(),
        model,
        config.simulation.seed
    );

    let mut rng = StdRng::seed_from_u64(config.simulation.seed);
    MemristorController::with_factory(
        |_| model.fabricate(params, &mut rng),
        rule,
        controller_config,
    )
}

/// Build the configured learning rule
///
/// A missing `learning_rate` falls back to the rule's default. PES without
/// configured encoders gets `default_encoders(out_size, post_dimensions)`.
pub fn build_rule(config: &MemristorConfig) -> Result<Rule> {
    let kind: RuleKind = config.learning.rule.parse()?;
    let dt = config.simulation.dt;
    let learning = &config.learning;

    let rule = match kind {
        RuleKind::Oja => Oja::new(
            learning.learning_rate.unwrap_or(OJA_LEARNING_RATE),
            dt,
            learning.beta,
        )?
        .into(),
        RuleKind::Bcm => Bcm::new(learning.learning_rate.unwrap_or(BCM_LEARNING_RATE), dt)?.into(),
        RuleKind::Pes => {
            let encoders = match &learning.encoders {
                Some(rows) => encoders_from_rows(rows)?,
                None => default_encoders(config.network.out_size, config.network.post_dimensions),
            };
            Pes::new(
                encoders,
                learning.learning_rate.unwrap_or(PES_LEARNING_RATE),
                dt,
            )?
            .with_error_threshold(learning.error_threshold)?
            .into()
        }
    };
    Ok(rule)
}

fn device_parameters(config: &MemristorConfig) -> DeviceParameters {
    let device = &config.device;
    DeviceParameters {
        r_min: device.r_min,
        r_max: device.r_max,
        exponent: device.exponent,
        gain: device.gain,
        initial_resistance_min: device.initial_resistance_min,
        initial_resistance_max: device.initial_resistance_max,
    }
}

fn encoders_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), cols), flat).map_err(|e| {
        PlasticityError::InvalidParameter(format!("encoders must be rectangular: {}", e))
    })
}
