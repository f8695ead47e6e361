// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `memristor_configuration.toml`. Missing
//! keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MemristorConfig {
    pub simulation: SimulationConfig,
    pub network: NetworkConfig,
    pub device: DeviceConfig,
    pub learning: LearningConfig,
    pub logging: LoggingConfig,
}

/// Timestep, seeding and history recording
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f64,
    pub seed: u64,
    /// Record weight and error history after every step
    pub logging: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.001,
            seed: 0,
            logging: true,
        }
    }
}

/// Array shape and represented dimensions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub in_size: usize,
    pub out_size: usize,
    pub pre_dimensions: usize,
    pub post_dimensions: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            in_size: 4,
            out_size: 4,
            pre_dimensions: 1,
            post_dimensions: 1,
        }
    }
}

/// Device model selection and physical constants
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// `power_law` or `differential`
    pub model: String,
    pub r_min: f64,
    pub r_max: f64,
    pub exponent: f64,
    pub gain: f64,
    pub initial_resistance_min: f64,
    pub initial_resistance_max: f64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            model: "power_law".to_string(),
            r_min: 1e2,
            r_max: 2.5e8,
            exponent: -0.1,
            gain: 1e5,
            initial_resistance_min: 1e8,
            initial_resistance_max: 1.1e8,
        }
    }
}

/// Learning rule selection and parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LearningConfig {
    /// `oja`, `bcm` or `pes`
    pub rule: String,
    /// Rule default when absent (Oja 1e-6, BCM 1e-9, PES 1e-5)
    pub learning_rate: Option<f64>,
    /// Oja forgetting factor
    pub beta: f64,
    /// PES error dead-zone
    pub error_threshold: f64,
    /// PES encoders, one row per output neuron
    pub encoders: Option<Vec<Vec<f64>>>,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            rule: "oja".to_string(),
            learning_rate: None,
            beta: 1.0,
            error_threshold: 1e-5,
            encoders: None,
        }
    }
}

/// Log output settings consumed by the observability crate
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}
