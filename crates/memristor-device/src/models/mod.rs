// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Memristor Model Architecture
//!
//! Trait-based device models so the array and the learning rules stay
//! independent of the physics.
//!
//! ## Adding a New Device Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement the `Memristor` trait
//! 3. Add a variant to `Device` / `DeviceModel`
//! 4. Export in `mod.rs`

pub mod device;
pub mod differential;
pub mod power_law;
pub mod traits;

pub use device::{Device, DeviceModel};
pub use differential::DifferentialMemristor;
pub use power_law::{PowerLawCell, PowerLawMemristor};
pub use traits::{Memristor, PulseMode, StateKind};
