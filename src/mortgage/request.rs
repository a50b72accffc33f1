//! JSON request and response shapes for a single mortgage calculation

use serde::{Deserialize, Serialize};

use crate::error::LoanResult;
use crate::loan::{Schedule, SolverConfig};

use super::{IllustrativeMortgage, LoanTerm, LoanTermRequest, MortgageResult, TermPayment};

/// Incoming mortgage calculation request
#[derive(Debug, Clone, Deserialize)]
pub struct MortgageRequest {
    pub start_value: f64,

    pub loan_terms: Vec<LoanTermRequest>,

    /// Maturity in periods (default: 25)
    #[serde(default = "default_repayment_period")]
    pub repayment_period: u32,

    /// Override the solver tolerance
    #[serde(default)]
    pub tol: Option<f64>,

    /// Override the solver iteration budget
    #[serde(default)]
    pub max_iterations: Option<u32>,
}

fn default_repayment_period() -> u32 { 25 }

impl MortgageRequest {
    pub fn from_json(json: &str) -> LoanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the request into a mortgage ready to calculate
    pub fn to_mortgage(&self) -> LoanResult<IllustrativeMortgage> {
        let loan_terms = self
            .loan_terms
            .iter()
            .cloned()
            .map(LoanTerm::try_from)
            .collect::<LoanResult<Vec<_>>>()?;
        IllustrativeMortgage::new(self.start_value, loan_terms, self.repayment_period)
    }

    /// Solver settings with any request overrides applied on top of `base`
    pub fn solver_config(&self, base: SolverConfig) -> SolverConfig {
        let mut config = base;
        if let Some(tol) = self.tol {
            config = config.with_tolerance(tol);
        }
        if let Some(max_iterations) = self.max_iterations {
            config = config.with_max_iterations(max_iterations);
        }
        config
    }
}

/// Outgoing mortgage result
#[derive(Debug, Clone, Serialize)]
pub struct MortgageResponse {
    pub repayment: Schedule,
    pub term_payments: Vec<TermPayment>,
    pub interest: f64,
    pub total: f64,
}

impl From<MortgageResult> for MortgageResponse {
    fn from(result: MortgageResult) -> Self {
        let summary = result.summary();
        Self {
            repayment: result.repayment,
            term_payments: result.term_payments,
            interest: summary.interest,
            total: summary.total,
        }
    }
}
