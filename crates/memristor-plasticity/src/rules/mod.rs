// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Learning Rules
//!
//! Every rule follows the same per-timestep skeleton:
//!
//! ```text
//! 1. slice the activity vector into pre / post / rule-specific tail
//! 2. compute an update target per cell (or per row)
//! 3. build the spike gate from the rounded activities
//! 4. pulse every open cell through DeviceArray::pulse_cell
//! 5. return W · pre using the just-updated weights
//! ```
//!
//! | Rule | Layout | Gate | Pulse mode |
//! |------|--------|------|------------|
//! | Oja  | `[pre, post]` | pre AND post | same |
//! | BCM  | `[pre, post, theta]` | pre AND post | same |
//! | PES  | `[pre, error]` | pre only | inverse |

pub mod bcm;
pub mod oja;
pub mod pes;

pub use bcm::Bcm;
pub use oja::Oja;
pub use pes::{default_encoders, Pes};

use core::str::FromStr;

use memristor_device::{DeviceArray, Memristor};
use ndarray::{Array1, ArrayView1};

use crate::error::{PlasticityError, Result};

/// Default integration step shared by every rule (seconds)
pub const DEFAULT_DT: f64 = 0.001;

/// A plasticity rule that updates a device array once per timestep
pub trait LearningRule {
    /// Short rule name
    fn name(&self) -> &'static str;

    /// Integration step the rule's learning rate is scaled by (seconds)
    fn dt(&self) -> f64;

    /// Length of the activity vector this rule expects for an
    /// `output_size x input_size` array
    fn activity_len(&self, input_size: usize, output_size: usize) -> usize;

    /// Check rule parameters against the array shape before the first step
    fn validate(&self, _input_size: usize, _output_size: usize) -> Result<()> {
        Ok(())
    }

    /// Apply one timestep of learning and return `W · pre`
    fn apply<M: Memristor>(
        &mut self,
        time: f64,
        activities: ArrayView1<'_, f64>,
        array: &mut DeviceArray<M>,
    ) -> Result<Array1<f64>>;

    /// Width of the error tail, for supervised rules
    fn error_dimensions(&self) -> Option<usize> {
        None
    }

    /// Error signal used on the last step, for supervised rules
    fn error_signal(&self) -> Option<&Array1<f64>> {
        None
    }
}

/// Names accepted in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Oja,
    Bcm,
    Pes,
}

impl FromStr for RuleKind {
    type Err = PlasticityError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oja" | "moja" => Ok(RuleKind::Oja),
            "bcm" | "mbcm" => Ok(RuleKind::Bcm),
            "pes" | "mpes" => Ok(RuleKind::Pes),
            _ => Err(PlasticityError::UnknownRule(s.to_string())),
        }
    }
}

/// Any of the built-in rules behind one concrete type
#[derive(Debug, Clone)]
pub enum Rule {
    Oja(Oja),
    Bcm(Bcm),
    Pes(Pes),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Oja(_) => RuleKind::Oja,
            Rule::Bcm(_) => RuleKind::Bcm,
            Rule::Pes(_) => RuleKind::Pes,
        }
    }
}

impl From<Oja> for Rule {
    fn from(rule: Oja) -> Self {
        Rule::Oja(rule)
    }
}

impl From<Bcm> for Rule {
    fn from(rule: Bcm) -> Self {
        Rule::Bcm(rule)
    }
}

impl From<Pes> for Rule {
    fn from(rule: Pes) -> Self {
        Rule::Pes(rule)
    }
}

impl LearningRule for Rule {
    fn name(&self) -> &'static str {
        match self {
            Rule::Oja(r) => r.name(),
            Rule::Bcm(r) => r.name(),
            Rule::Pes(r) => r.name(),
        }
    }

    fn dt(&self) -> f64 {
        match self {
            Rule::Oja(r) => r.dt(),
            Rule::Bcm(r) => r.dt(),
            Rule::Pes(r) => r.dt(),
        }
    }

    fn activity_len(&self, input_size: usize, output_size: usize) -> usize {
        match self {
            Rule::Oja(r) => r.activity_len(input_size, output_size),
            Rule::Bcm(r) => r.activity_len(input_size, output_size),
            Rule::Pes(r) => r.activity_len(input_size, output_size),
        }
    }

    fn validate(&self, input_size: usize, output_size: usize) -> Result<()> {
        match self {
            Rule::Oja(r) => r.validate(input_size, output_size),
            Rule::Bcm(r) => r.validate(input_size, output_size),
            Rule::Pes(r) => r.validate(input_size, output_size),
        }
    }

    fn apply<M: Memristor>(
        &mut self,
        time: f64,
        activities: ArrayView1<'_, f64>,
        array: &mut DeviceArray<M>,
    ) -> Result<Array1<f64>> {
        match self {
            Rule::Oja(r) => r.apply(time, activities, array),
            Rule::Bcm(r) => r.apply(time, activities, array),
            Rule::Pes(r) => r.apply(time, activities, array),
        }
    }

    fn error_dimensions(&self) -> Option<usize> {
        match self {
            Rule::Oja(r) => r.error_dimensions(),
            Rule::Bcm(r) => r.error_dimensions(),
            Rule::Pes(r) => r.error_dimensions(),
        }
    }

    fn error_signal(&self) -> Option<&Array1<f64>> {
        match self {
            Rule::Oja(r) => r.error_signal(),
            Rule::Bcm(r) => r.error_signal(),
            Rule::Pes(r) => r.error_signal(),
        }
    }
}

/// Reject non-finite or non-positive rates and step sizes
pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(PlasticityError::InvalidParameter(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )));
    }
    Ok(())
}
