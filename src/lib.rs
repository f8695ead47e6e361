// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # memristor-learning
//!
//! Memristor-backed synaptic weights for spiking neural network simulators.
//! A grid of simulated memristors holds the weight matrix. Spike-gated learning
//! rules update it in place by pulsing individual devices.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! memristor-learning = "0.1"
//! ```
//!
//! ## Feature Flags
//!
//! - **`config`** (default): load runs from `memristor_configuration.toml`
//! - **`observability`** (default): `tracing-subscriber` setup and debug flags
//! - **`serde`**: serialisable device parameters and history records
//!
//! ## Usage Examples
//!
//! ### Typed controller
//!
//! ```rust
//! use memristor_learning::prelude::*;
//!
//! let rule = Pes::new(default_encoders(4, 1), 1e-5, 0.001)?;
//! let config = ControllerConfig::new(3, 4).with_seed(1);
//! let mut controller: MemristorController<PowerLawMemristor, Pes> =
//!     MemristorController::new(rule, config, DeviceParameters::default())?;
//!
//! // [pre (3), error (1)]
//! let output = controller.step(0.001, &[1.0, 0.0, 2.0, 0.3])?;
//! assert_eq!(output.len(), 4);
//! # Ok::<(), PlasticityError>(())
//! ```
//!
//! ### From a configuration file
//!
//! ```rust,no_run
//! use memristor_learning::config::load_config;
//! use memristor_learning::plasticity::from_config;
//!
//! let config = load_config(None, None)?;
//! let mut controller = from_config(&config)?;
//! let output = controller.step(0.001, &vec![1.0; controller.activity_len()])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: memristor-config, memristor-observability  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Devices: memristor-device                              │
//! │  (power-law models, device array, weight history)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: memristor-plasticity                       │
//! │  (Oja, BCM, PES, spike gating, controller)              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export devices
pub use memristor_device as device;

// Re-export algorithms
pub use memristor_plasticity as plasticity;

// Re-export foundation
#[cfg(feature = "config")]
pub use memristor_config as config;

#[cfg(feature = "observability")]
pub use memristor_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::device::{
        Device, DeviceArray, DeviceModel, DeviceParameters, DifferentialMemristor, Memristor,
        PowerLawMemristor, PulseMode, StateKind,
    };
    pub use crate::plasticity::{
        default_encoders, Bcm, ControllerConfig, LearningRule, MemristorController, Oja, Pes,
        PlasticityError, Rule, RuleKind,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, MemristorConfig};

    #[cfg(feature = "config")]
    pub use crate::plasticity::from_config;

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags, LoggingConfig};
}
