//! Solving for the flat payment that clears a loan at maturity

use log::debug;
use serde::Serialize;

use crate::error::{LoanError, LoanResult};
use crate::process::{ConstantValue, Process};
use crate::roots::{bisect, DEFAULT_MAX_ITERATIONS};

use super::simulate::{simulate, validate_run, Simulation};
use super::Schedule;

/// Default tolerance on both the payment bracket and the ending balance
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Configuration for the flat-payment search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Bisection tolerance
    pub tol: f64,

    /// Bisection iteration budget
    pub max_iterations: u32,

    /// Lower end of the payment bracket (default: 0)
    pub lower: Option<f64>,

    /// Upper end of the payment bracket (default: the starting balance)
    pub upper: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower: None,
            upper: None,
        }
    }
}

impl SolverConfig {
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Search the payment over `[lower, upper]` instead of `[0, start_value]`
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }

    /// Payment bracket for a loan starting at `start_value`
    pub fn bracket(&self, start_value: f64) -> (f64, f64) {
        (self.lower.unwrap_or(0.0), self.upper.unwrap_or(start_value))
    }

    fn validate(&self) -> LoanResult<()> {
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(LoanError::invalid(format!("tol must be positive, got {}", self.tol)));
        }
        Ok(())
    }
}

/// Find the constant payment that brings the balance to zero at maturity
///
/// Searches by bisection over the configured bracket, simulating the loan from
/// `time_step` to `repayment_period` for each candidate payment. The bracket is
/// assumed to contain the root; it is not widened or retried.
pub fn find_flat_payment<R: Process>(
    start_value: f64,
    interest_rate_process: R,
    time_step: u32,
    repayment_period: u32,
    config: &SolverConfig,
) -> LoanResult<f64> {
    validate_run(start_value, time_step, repayment_period)?;
    config.validate()?;

    let objective_func = |flat_payment: f64| {
        Simulation::unchecked(
            start_value,
            &interest_rate_process,
            ConstantValue::unchecked(flat_payment),
            time_step,
            repayment_period,
        )
        .last()
        .map(|period| period.end_value())
        .unwrap_or(start_value)
    };

    let (a, b) = config.bracket(start_value);
    for edge in [a, b] {
        let balance = objective_func(edge);
        if !balance.is_finite() {
            return Err(LoanError::invalid(format!(
                "ending balance {} at payment {} is not finite",
                balance, edge
            )));
        }
    }

    let root = bisect(objective_func, a, b, config.tol, config.max_iterations);

    if !root.converged {
        return Err(LoanError::NonConvergence {
            iterations: root.iterations,
            value: root.value,
            tol: root.tol,
        });
    }

    debug!(
        "flat payment {:.6} for balance {:.2} over steps {}..{} ({} iterations)",
        root.value, start_value, time_step, repayment_period, root.iterations
    );
    Ok(root.value)
}

/// Solved single-rate loan: the flat payment and its full repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatPayment {
    pub payment: f64,
    pub total: f64,
    pub repayment: Schedule,
}

impl FlatPayment {
    pub fn new(payment: f64, total: f64, repayment: Schedule) -> LoanResult<Self> {
        if repayment.is_empty() {
            return Err(LoanError::invalid("Must provide at least one LoanPeriod"));
        }
        Ok(Self {
            payment,
            total,
            repayment,
        })
    }
}

/// Solve the flat payment and simulate the loan at that payment
pub fn summarize_flat_payment<R: Process>(
    start_value: f64,
    interest_rate_process: R,
    time_step: u32,
    repayment_period: u32,
    config: &SolverConfig,
) -> LoanResult<FlatPayment> {
    let payment = find_flat_payment(
        start_value,
        &interest_rate_process,
        time_step,
        repayment_period,
        config,
    )?;

    let repayment: Schedule = simulate(
        start_value,
        &interest_rate_process,
        ConstantValue::unchecked(payment),
        time_step,
        repayment_period,
    )?
    .collect();

    let total = repayment.total();
    FlatPayment::new(payment, total, repayment)
}
