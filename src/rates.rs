//! Interest rate conversion between compounding periods
//!
//! Rates are quoted over one compounding period (e.g. annual) and applied over
//! another (e.g. monthly). Two conventions are supported:
//! - Simple: linear pro-ration, `rate * from / to`
//! - Compound: equivalent rate, `(1 + rate)^(from / to) - 1`

use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};

/// Convert `rate` quoted over `from_period` into the rate over `to_period`
///
/// The compound form satisfies `(1 + converted)^to_period == (1 + rate)^from_period`.
/// Period counts must be positive; use [`RateConversion::new`] for a validated form.
pub fn convert_rate(rate: f64, from_period: u32, to_period: u32, simple: bool) -> f64 {
    let ratio = from_period as f64 / to_period as f64;
    if simple {
        rate * ratio
    } else {
        (1.0 + rate).powf(ratio) - 1.0
    }
}

/// Compounding settings used to turn a nominal term rate into a per-period rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateConversion {
    /// Compounding period the rate is quoted over
    pub from_period: u32,
    /// Compounding period the rate is applied over
    pub to_period: u32,
    /// Linear pro-ration instead of compound equivalence
    pub simple: bool,
}

impl RateConversion {
    pub fn new(from_period: u32, to_period: u32, simple: bool) -> LoanResult<Self> {
        if from_period == 0 || to_period == 0 {
            return Err(LoanError::invalid(format!(
                "compounding periods must be positive, got from_period={} to_period={}",
                from_period, to_period
            )));
        }
        Ok(Self {
            from_period,
            to_period,
            simple,
        })
    }

    /// Annual rate applied monthly by simple division (the mortgage quoting convention)
    pub fn annual_to_monthly() -> Self {
        Self {
            from_period: 1,
            to_period: 12,
            simple: true,
        }
    }

    pub fn apply(&self, rate: f64) -> f64 {
        convert_rate(rate, self.from_period, self.to_period, self.simple)
    }

    /// Conversion in the opposite direction
    pub fn inverse(&self) -> Self {
        Self {
            from_period: self.to_period,
            to_period: self.from_period,
            simple: self.simple,
        }
    }
}

impl Default for RateConversion {
    fn default() -> Self {
        Self::annual_to_monthly()
    }
}
