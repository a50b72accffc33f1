//! Fixed-rate segments of a multi-term mortgage

use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};
use crate::rates::RateConversion;

/// A contiguous span of periods at a contractually fixed rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTerm {
    rate: f64,
    term: u32,
    conversion: RateConversion,
}

impl LoanTerm {
    /// Annual `rate` fixed for `term` monthly periods
    pub fn new(rate: f64, term: u32) -> LoanResult<Self> {
        Self::with_conversion(rate, term, RateConversion::annual_to_monthly())
    }

    pub fn with_conversion(rate: f64, term: u32, conversion: RateConversion) -> LoanResult<Self> {
        if !rate.is_finite() || rate <= -1.0 {
            return Err(LoanError::invalid(format!(
                "loan term rate must be finite and above -100%, got {}",
                rate
            )));
        }
        if term == 0 {
            return Err(LoanError::invalid("loan term length must be positive"));
        }
        // Re-validate in case the conversion was built by hand
        let conversion =
            RateConversion::new(conversion.from_period, conversion.to_period, conversion.simple)?;
        Ok(Self { rate, term, conversion })
    }

    /// Nominal rate as quoted
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Segment length in periods
    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn conversion(&self) -> RateConversion {
        self.conversion
    }

    /// Rate charged per simulated period
    pub fn periodic_rate(&self) -> f64 {
        self.conversion.apply(self.rate)
    }
}

fn default_from_period() -> u32 { 1 }
fn default_to_period() -> u32 { 12 }
fn default_simple() -> bool { true }

/// Wire form of a loan term; compounding settings default to annual-to-monthly simple
#[derive(Debug, Clone, Deserialize)]
pub struct LoanTermRequest {
    pub rate: f64,

    pub term: u32,

    #[serde(default = "default_from_period")]
    pub from_period: u32,

    #[serde(default = "default_to_period")]
    pub to_period: u32,

    #[serde(default = "default_simple")]
    pub simple: bool,
}

impl TryFrom<LoanTermRequest> for LoanTerm {
    type Error = LoanError;

    fn try_from(request: LoanTermRequest) -> LoanResult<Self> {
        let conversion =
            RateConversion::new(request.from_period, request.to_period, request.simple)?;
        LoanTerm::with_conversion(request.rate, request.term, conversion)
    }
}
