// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are resolved in three layers, later layers winning:
//! 1. TOML file (base values, missing keys take the defaults)
//! 2. Environment variables (`MEMRISTOR_*`)
//! 3. CLI `key=value` overrides

use crate::{ConfigError, ConfigResult, MemristorConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "memristor_configuration.toml";

/// Environment variable and CLI key for every overridable setting
const OVERRIDES: &[(&str, &str)] = &[
    ("MEMRISTOR_DT", "dt"),
    ("MEMRISTOR_SEED", "seed"),
    ("MEMRISTOR_LOGGING", "logging"),
    ("MEMRISTOR_IN_SIZE", "in_size"),
    ("MEMRISTOR_OUT_SIZE", "out_size"),
    ("MEMRISTOR_RULE", "rule"),
    ("MEMRISTOR_LEARNING_RATE", "learning_rate"),
    ("MEMRISTOR_DEVICE_MODEL", "device_model"),
    ("MEMRISTOR_LOG_LEVEL", "log_level"),
];

/// Find the configuration file
///
/// Search order:
/// 1. `MEMRISTOR_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("MEMRISTOR_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by MEMRISTOR_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet MEMRISTOR_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Parse a configuration from TOML text, without applying overrides
pub fn parse_config(content: &str) -> ConfigResult<MemristorConfig> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found, cannot be read, contains invalid
/// TOML, or an override carries an unparsable value
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<MemristorConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config = parse_config(&content)?;

    apply_environment_overrides(&mut config)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides
///
/// Supported environment variables:
/// - `MEMRISTOR_DT` -> `simulation.dt`
/// - `MEMRISTOR_SEED` -> `simulation.seed`
/// - `MEMRISTOR_LOGGING` -> `simulation.logging`
/// - `MEMRISTOR_IN_SIZE` / `MEMRISTOR_OUT_SIZE` -> `network.*`
/// - `MEMRISTOR_RULE` -> `learning.rule`
/// - `MEMRISTOR_LEARNING_RATE` -> `learning.learning_rate`
/// - `MEMRISTOR_DEVICE_MODEL` -> `device.model`
/// - `MEMRISTOR_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut MemristorConfig) -> ConfigResult<()> {
    apply_overrides_from(config, |key| {
        OVERRIDES
            .iter()
            .find(|(_, cli)| *cli == key)
            .and_then(|(var, _)| env::var(var).ok())
    })
}

/// Apply CLI argument overrides
///
/// Keys are the lower-case names listed for the environment variables
/// (`dt`, `seed`, `logging`, `in_size`, `out_size`, `rule`, `learning_rate`,
/// `device_model`, `log_level`).
pub fn apply_cli_overrides(
    config: &mut MemristorConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    apply_overrides_from(config, |key| cli_args.get(key).cloned())
}

/// Apply every override `lookup` returns a value for
pub fn apply_overrides_from<F>(config: &mut MemristorConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    for (_, key) in OVERRIDES {
        let Some(value) = lookup(key) else {
            continue;
        };
        match *key {
            "dt" => config.simulation.dt = parse_value(key, &value)?,
            "seed" => config.simulation.seed = parse_value(key, &value)?,
            "logging" => config.simulation.logging = parse_bool(key, &value)?,
            "in_size" => config.network.in_size = parse_value(key, &value)?,
            "out_size" => config.network.out_size = parse_value(key, &value)?,
            "rule" => config.learning.rule = value,
            "learning_rate" => config.learning.learning_rate = Some(parse_value(key, &value)?),
            "device_model" => config.device.model = value,
            "log_level" => config.logging.level = value,
            _ => {}
        }
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{} = {:?}", key, value)))
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!("{} = {:?}", key, value))),
    }
}
