// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every check runs and every failure is reported, so a broken file can be
//! fixed in one pass.

use crate::{ConfigError, ConfigResult, MemristorConfig};

const DEVICE_MODELS: &[&str] = &["power_law", "differential"];
const RULES: &[&str] = &["oja", "moja", "bcm", "mbcm", "pes", "mpes"];
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    NotPositive { field: String, value: f64 },
    UnknownChoice { field: String, value: String, allowed: &'static [&'static str] },
    InvalidRange { field: String, reason: String },
    ShapeMismatch { field: String, expected: usize, actual: usize },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{} must be positive and finite, got {}", field, value)
            }
            Self::UnknownChoice {
                field,
                value,
                allowed,
            } => {
                write!(
                    f,
                    "{} = {:?} is not one of [{}]",
                    field,
                    value,
                    allowed.join(", ")
                )
            }
            Self::InvalidRange { field, reason } => {
                write!(f, "Invalid range for {}: {}", field, reason)
            }
            Self::ShapeMismatch {
                field,
                expected,
                actual,
            } => {
                write!(f, "{} expected {} entries, got {}", field, expected, actual)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &MemristorConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_simulation(config, &mut errors);
    validate_network(config, &mut errors);
    validate_device(config, &mut errors);
    validate_learning(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn positive(field: &str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigValidationError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
}

fn choice(
    field: &str,
    value: &str,
    allowed: &'static [&'static str],
    errors: &mut Vec<ConfigValidationError>,
) {
    if !allowed.contains(&value.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::UnknownChoice {
            field: field.to_string(),
            value: value.to_string(),
            allowed,
        });
    }
}

fn validate_simulation(config: &MemristorConfig, errors: &mut Vec<ConfigValidationError>) {
    positive("simulation.dt", config.simulation.dt, errors);
}

fn validate_network(config: &MemristorConfig, errors: &mut Vec<ConfigValidationError>) {
    let network = &config.network;
    for (field, value) in [
        ("network.in_size", network.in_size),
        ("network.out_size", network.out_size),
        ("network.pre_dimensions", network.pre_dimensions),
        ("network.post_dimensions", network.post_dimensions),
    ] {
        if value == 0 {
            errors.push(ConfigValidationError::NotPositive {
                field: field.to_string(),
                value: 0.0,
            });
        }
    }
}

fn validate_device(config: &MemristorConfig, errors: &mut Vec<ConfigValidationError>) {
    let device = &config.device;
    choice("device.model", &device.model, DEVICE_MODELS, errors);
    positive("device.r_min", device.r_min, errors);
    positive("device.r_max", device.r_max, errors);
    positive("device.gain", device.gain, errors);

    if device.r_min >= device.r_max {
        errors.push(ConfigValidationError::InvalidRange {
            field: "device.r_min/r_max".to_string(),
            reason: format!("r_min {} must be below r_max {}", device.r_min, device.r_max),
        });
    }
    if !(device.exponent.is_finite() && device.exponent < 0.0) {
        errors.push(ConfigValidationError::InvalidRange {
            field: "device.exponent".to_string(),
            reason: format!("must be negative and finite, got {}", device.exponent),
        });
    }
    let (lo, hi) = (device.initial_resistance_min, device.initial_resistance_max);
    if !(lo <= hi && lo >= device.r_min && hi <= device.r_max) {
        errors.push(ConfigValidationError::InvalidRange {
            field: "device.initial_resistance".to_string(),
            reason: format!(
                "[{}, {}] must be ordered and inside [{}, {}]",
                lo, hi, device.r_min, device.r_max
            ),
        });
    }
}

fn validate_learning(config: &MemristorConfig, errors: &mut Vec<ConfigValidationError>) {
    let learning = &config.learning;
    choice("learning.rule", &learning.rule, RULES, errors);
    if let Some(rate) = learning.learning_rate {
        positive("learning.learning_rate", rate, errors);
    }
    if !learning.beta.is_finite() {
        errors.push(ConfigValidationError::InvalidRange {
            field: "learning.beta".to_string(),
            reason: format!("must be finite, got {}", learning.beta),
        });
    }
    if !(learning.error_threshold.is_finite() && learning.error_threshold >= 0.0) {
        errors.push(ConfigValidationError::InvalidRange {
            field: "learning.error_threshold".to_string(),
            reason: format!("must be non-negative, got {}", learning.error_threshold),
        });
    }

    if let Some(encoders) = &learning.encoders {
        if encoders.len() != config.network.out_size {
            errors.push(ConfigValidationError::ShapeMismatch {
                field: "learning.encoders rows".to_string(),
                expected: config.network.out_size,
                actual: encoders.len(),
            });
        }
        for (j, row) in encoders.iter().enumerate() {
            if row.len() != config.network.post_dimensions {
                errors.push(ConfigValidationError::ShapeMismatch {
                    field: format!("learning.encoders[{}]", j),
                    expected: config.network.post_dimensions,
                    actual: row.len(),
                });
            }
        }
    }
}

fn validate_logging(config: &MemristorConfig, errors: &mut Vec<ConfigValidationError>) {
    choice("logging.level", &config.logging.level, LOG_LEVELS, errors);
    choice("logging.format", &config.logging.format, LOG_FORMATS, errors);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        assert!(validate_config(&MemristorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MemristorConfig::default();
        config.simulation.dt = 0.0;
        config.device.model = "linear".to_string();
        config.learning.rule = "stdp".to_string();

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("simulation.dt"));
        assert!(err.contains("device.model"));
        assert!(err.contains("learning.rule"));
    }

    #[test]
    fn test_rule_names_case_insensitive() {
        let mut config = MemristorConfig::default();
        config.learning.rule = "mPES".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_device_ranges() {
        let mut config = MemristorConfig::default();
        config.device.r_min = 3e8;
        assert!(validate_config(&config).is_err());

        let mut config = MemristorConfig::default();
        config.device.exponent = 0.1;
        assert!(validate_config(&config).is_err());

        let mut config = MemristorConfig::default();
        config.device.initial_resistance_max = 9e7;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_encoder_shape() {
        let mut config = MemristorConfig::default();
        config.network.out_size = 2;
        config.network.post_dimensions = 2;
        config.learning.encoders = Some(vec![vec![1.0, 0.0], vec![0.0]]);

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("learning.encoders[1]"));
        assert!(!err.contains("encoders rows"));
    }

    #[test]
    fn test_logging_choices() {
        let mut config = MemristorConfig::default();
        config.logging.format = "yaml".to_string();
        assert!(validate_config(&config).is_err());
    }
}
