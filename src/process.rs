//! Processes driving loan interest rates and payment amounts over time

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, LoanResult};

/// A value that evolves with the period index
///
/// Called once per period in ascending `time_step` order within a simulation run.
pub trait Process {
    fn step(&self, time_step: u32) -> f64;
}

/// Same value at every time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantValue {
    value: f64,
}

impl ConstantValue {
    pub fn new(value: f64) -> LoanResult<Self> {
        ensure_non_negative("constant process value", value)?;
        Ok(Self { value })
    }

    /// Unvalidated constructor for values the crate has already checked or derived
    pub(crate) fn unchecked(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Process for ConstantValue {
    fn step(&self, _time_step: u32) -> f64 {
        self.value
    }
}

/// A raw scalar behaves as a constant process
impl Process for f64 {
    fn step(&self, _time_step: u32) -> f64 {
        *self
    }
}

impl<P: Process + ?Sized> Process for &P {
    fn step(&self, time_step: u32) -> f64 {
        (**self).step(time_step)
    }
}

impl<P: Process + ?Sized> Process for Box<P> {
    fn step(&self, time_step: u32) -> f64 {
        (**self).step(time_step)
    }
}
