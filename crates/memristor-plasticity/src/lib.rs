// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Memristor Plasticity
//!
//! Learning rules that train memristor device arrays one timestep at a time.
//!
//! - **Rules**: Oja, BCM (unsupervised) and PES (supervised)
//! - **Spike gating**: only cells whose neurons spiked this step are pulsed
//! - **Controller**: binds one array to one rule, checks time ordering and
//!   records weight/error history
//!
//! ```rust
//! use memristor_device::{DeviceParameters, PowerLawMemristor};
//! use memristor_plasticity::{ControllerConfig, MemristorController, Oja};
//!
//! let config = ControllerConfig::new(2, 2).with_seed(7);
//! let mut controller: MemristorController<PowerLawMemristor, Oja> =
//!     MemristorController::new(Oja::default(), config, DeviceParameters::default()).unwrap();
//!
//! // [pre..., post...]
//! let output = controller.step(0.001, &[1.0, 0.0, 1.0, 0.0]).unwrap();
//! assert_eq!(output.len(), 2);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "config")]
pub mod builder;
pub mod controller;
pub mod error;
pub mod rules;
pub mod spikes;

#[cfg(feature = "config")]
pub use builder::{build_rule, from_config};
pub use controller::{ControllerConfig, MemristorController};
pub use error::{PlasticityError, Result};
pub use rules::{default_encoders, Bcm, LearningRule, Oja, Pes, Rule, RuleKind, DEFAULT_DT};
pub use spikes::{spike_vector, spiked, SpikeGate};
