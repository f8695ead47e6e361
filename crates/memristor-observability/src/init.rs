// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Installs one global `tracing` subscriber: a console layer in text or JSON,
//! and with the `file-logging` feature a JSON file layer in a timestamped run
//! folder:
//!
//! ```text
//! <log_dir>/
//!   └── run_20250101_120000/
//!       └── memristor.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Number of run folders kept by `cleanup_old_runs` during file logging
pub const DEFAULT_RETENTION_RUNS: usize = 10;

/// Keeps file writers alive; logs are flushed when dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving the log file, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// `EnvFilter` for the configured base level plus per-crate debug flags
pub fn build_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer {
    match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if the level is not a valid filter, the run folder cannot be
/// created, `log_dir` is set without the `file-logging` feature, or a global
/// subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut layers: Vec<BoxedLayer> = vec![console_layer(
        config.format,
        build_filter(debug_flags, config)?,
    )];

    #[cfg(feature = "file-logging")]
    let (file_guard, log_dir) = match &config.log_dir {
        Some(base) => {
            let (layer, guard, run_folder) = file_layer(debug_flags, config, base)?;
            layers.push(layer);
            (Some(guard), Some(run_folder))
        }
        None => (None, None),
    };

    #[cfg(not(feature = "file-logging"))]
    let log_dir = match &config.log_dir {
        Some(dir) => anyhow::bail!(
            "log_dir {} requires the file-logging feature",
            dir.display()
        ),
        None => None,
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: file_guard,
        log_dir,
    })
}

/// Initialize console logging at `info` with the given debug flags
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingConfig::default())
}

#[cfg(feature = "file-logging")]
fn file_layer(
    debug_flags: &CrateDebugFlags,
    config: &LoggingConfig,
    base_log_dir: &Path,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard, PathBuf)> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(base_log_dir, DEFAULT_RETENTION_RUNS)?;

    let appender = tracing_appender::rolling::never(&run_folder, "memristor.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(debug_flags, config)?)
        .boxed();

    Ok((layer, guard, run_folder))
}

/// Delete all but the `keep` most recent `run_*` folders under `base_log_dir`
///
/// Folder names embed a sortable timestamp, so lexical order is age order.
#[cfg(feature = "file-logging")]
pub fn cleanup_old_runs(base_log_dir: &Path, keep: usize) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let mut runs: Vec<PathBuf> = std::fs::read_dir(base_log_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("run_"))
        })
        .collect();
    runs.sort();

    let excess = runs.len().saturating_sub(keep);
    for path in runs.iter().take(excess) {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove old log directory {}", path.display()))?;
    }
    Ok(excess)
}
