//! Multi-term illustrative mortgage
//!
//! The interest rate is contractually fixed for a few consecutive terms, e.g.
//! - Fixed term: 24 months at a low introductory offer
//! - Intermediary term: 12 months at a higher rate
//! - Remainder: the rest of the loan at another rate
//!
//! At every term boundary the flat payment is re-solved from the balance
//! carried into that term, at the term's rate, over the whole remaining horizon
//! to the original maturity. The last term's rate therefore runs to maturity.

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{ensure_non_negative, LoanError, LoanResult};
use crate::loan::{find_flat_payment, simulate, Schedule, SolverConfig};
use crate::process::ConstantValue;

use super::LoanTerm;

/// Flat payment solved at one term boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermPayment {
    /// First time step the payment applies to
    pub time_step: u32,
    /// Balance carried into the term
    pub start_value: f64,
    /// Per-period rate for the term
    pub periodic_rate: f64,
    pub payment: f64,
}

/// Schedule plus the payment solved for each term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortgageResult {
    pub repayment: Schedule,
    pub term_payments: Vec<TermPayment>,
}

impl MortgageResult {
    pub fn summary(&self) -> MortgageSummary {
        MortgageSummary {
            periods: self.repayment.len(),
            total: self.repayment.total(),
            interest: self.repayment.interest(),
            final_balance: self.repayment.final_balance(),
        }
    }
}

/// Aggregates over a mortgage schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MortgageSummary {
    pub periods: usize,
    pub total: f64,
    pub interest: f64,
    pub final_balance: f64,
}

/// Loan whose rate changes across several fixed terms
#[derive(Debug, Clone, PartialEq)]
pub struct IllustrativeMortgage {
    start_value: f64,
    loan_terms: Vec<LoanTerm>,
    repayment_period: u32,
}

impl IllustrativeMortgage {
    pub fn new(
        start_value: f64,
        loan_terms: Vec<LoanTerm>,
        repayment_period: u32,
    ) -> LoanResult<Self> {
        if loan_terms.is_empty() {
            return Err(LoanError::invalid("Must provide at least one loan term."));
        }
        ensure_non_negative("start_value", start_value)?;
        if repayment_period == 0 {
            return Err(LoanError::invalid("repayment_period must be positive"));
        }
        Ok(Self {
            start_value,
            loan_terms,
            repayment_period,
        })
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn loan_terms(&self) -> &[LoanTerm] {
        &self.loan_terms
    }

    pub fn repayment_period(&self) -> u32 {
        self.repayment_period
    }

    /// Repayment schedule with the default solver settings
    pub fn calculate(&self) -> LoanResult<Schedule> {
        self.calculate_with(&SolverConfig::default())
    }

    pub fn calculate_with(&self, config: &SolverConfig) -> LoanResult<Schedule> {
        self.run(config).map(|result| result.repayment)
    }

    /// Solve every term and stitch the segments into one schedule
    pub fn run(&self, config: &SolverConfig) -> LoanResult<MortgageResult> {
        let maturity = self.repayment_period;
        let mut repayment = Schedule::default();
        let mut term_payments = Vec::with_capacity(self.loan_terms.len());
        let mut boundary: u32 = 0;

        for (index, term) in self.loan_terms.iter().enumerate() {
            if boundary >= maturity {
                warn!(
                    "ignoring {} loan term(s) starting at or after maturity {}",
                    self.loan_terms.len() - index,
                    maturity
                );
                break;
            }

            // Periods past the boundary were run at the previous rate and are replaced
            let confirmed = repayment.truncated(boundary as usize);
            let start_value = confirmed
                .last()
                .map(|period| period.end_value())
                .unwrap_or(self.start_value);

            let periodic_rate = term.periodic_rate();
            let rate = ConstantValue::unchecked(periodic_rate);
            let payment = find_flat_payment(start_value, rate, boundary, maturity, config)?;

            debug!(
                "term {}: rate {} ({} per period) from step {} on balance {:.2}, payment {:.2}",
                index,
                term.rate(),
                periodic_rate,
                boundary,
                start_value,
                payment
            );

            let flat = ConstantValue::unchecked(payment);
            let tail = simulate(start_value, rate, flat, boundary, maturity)?;
            repayment = confirmed.extended(tail);
            term_payments.push(TermPayment {
                time_step: boundary,
                start_value,
                periodic_rate,
                payment,
            });

            boundary = boundary.saturating_add(term.term());
        }

        let final_balance = repayment.final_balance();
        if final_balance.abs() > config.tol {
            warn!(
                "balance {:.6} left at maturity {}; the payment bracket may not contain the root",
                final_balance, maturity
            );
        }

        info!(
            "illustrative mortgage: {} periods, total paid {:.2}",
            repayment.len(),
            repayment.total()
        );

        Ok(MortgageResult {
            repayment,
            term_payments,
        })
    }
}

/// Repayment schedule for `start_value` over `loan_terms`
///
/// The loan matures after `repayment_period` periods.
pub fn illustrative_mortgage(
    start_value: f64,
    loan_terms: Vec<LoanTerm>,
    repayment_period: u32,
) -> LoanResult<Schedule> {
    IllustrativeMortgage::new(start_value, loan_terms, repayment_period)?.calculate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{convert_rate, RateConversion};
    use approx::assert_abs_diff_eq;

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn terms(quotes: &[(f64, u32)]) -> Vec<LoanTerm> {
        quotes.iter()
            .map(|&(rate, term)| LoanTerm::new(rate, term).unwrap())
            .collect()
    }

    #[test]
    fn test_no_loan_terms() {
        let err = IllustrativeMortgage::new(0.0, vec![], 300).unwrap_err();
        assert_eq!(
            err,
            LoanError::invalid("Must provide at least one loan term.")
        );
    }

    #[test]
    fn test_invalid_mortgage() {
        assert!(IllustrativeMortgage::new(-1.0, terms(&[(0.05, 12)]), 300).is_err());
        assert!(IllustrativeMortgage::new(1_000.0, terms(&[(0.05, 12)]), 0).is_err());
    }

    #[test]
    fn test_two_term_mortgage() {
        let repayment =
            illustrative_mortgage(240_000.0, terms(&[(0.0519, 24), (0.0779, 1)]), 300).unwrap();

        assert_eq!(repayment.len(), 300);
        assert_eq!(round2(repayment[0].payment()), 1429.71);
        assert_eq!(round2(repayment[23].payment()), 1429.71);
        assert_eq!(round2(repayment[24].payment()), 1794.71);
        assert_eq!(repayment.total().round(), 529_653.0);
        assert_eq!(repayment.interest().round(), 529_653.0 - 240_000.0);
    }

    #[test]
    fn test_three_term_mortgage() {
        let repayment = illustrative_mortgage(
            240_000.0,
            terms(&[(0.0493, 24), (0.0675, 36), (0.0849, 1)]),
            300,
        )
        .unwrap();

        assert_eq!(repayment.len(), 300);
        assert_eq!(round2(repayment[0].payment()), 1393.25);
        assert_eq!(round2(repayment[24].payment()), 1641.37);
        assert_eq!(round2(repayment[24 + 36].payment()), 1871.97);
        assert!((repayment.interest().round() - (541_800.0 - 240_000.0)).abs() <= 1.0);
        assert!((repayment.total().round() - 541_800.0).abs() <= 1.0);
    }

    #[test]
    fn test_segments_are_stitched_contiguously() {
        let quotes = [(0.0493, 24), (0.0675, 36), (0.0849, 1)];
        let mortgage = IllustrativeMortgage::new(240_000.0, terms(&quotes), 300).unwrap();
        let result = mortgage.run(&SolverConfig::default()).unwrap();

        for (index, period) in result.repayment.iter().enumerate() {
            assert_eq!(period.time_step() as usize, index);
        }
        for pair in result.repayment.periods().windows(2) {
            assert_abs_diff_eq!(pair[1].start_value(), pair[0].end_value(), epsilon = 1e-9);
        }

        let boundaries: Vec<u32> = result.term_payments.iter().map(|t| t.time_step).collect();
        assert_eq!(boundaries, vec![0, 24, 60]);
        assert_abs_diff_eq!(result.term_payments[1].start_value, result.repayment[23].end_value());

        let summary = result.summary();
        assert_eq!(summary.periods, 300);
        assert_abs_diff_eq!(summary.final_balance, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_single_term_matches_flat_payment() {
        let repayment = illustrative_mortgage(10_000.0, terms(&[(0.0, 300)]), 25).unwrap();

        assert_eq!(repayment.len(), 25);
        for period in &repayment {
            assert_abs_diff_eq!(period.payment(), 400.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_terms_past_maturity_are_ignored() {
        let mortgage =
            IllustrativeMortgage::new(10_000.0, terms(&[(0.05, 25), (0.09, 12)]), 25).unwrap();
        let result = mortgage.run(&SolverConfig::default()).unwrap();

        assert_eq!(result.repayment.len(), 25);
        assert_eq!(result.term_payments.len(), 1);
    }

    #[test]
    fn test_compound_conversion_term() {
        let conversion = RateConversion::new(1, 12, false).unwrap();
        let term = LoanTerm::with_conversion(0.0779, 300, conversion).unwrap();
        let repayment = illustrative_mortgage(240_000.0, vec![term], 300).unwrap();

        let monthly = convert_rate(0.0779, 1, 12, false);
        let expected =
            find_flat_payment(240_000.0, monthly, 0, 300, &SolverConfig::default()).unwrap();

        assert_eq!(repayment.len(), 300);
        assert_abs_diff_eq!(repayment[0].interest(), 240_000.0 * monthly, epsilon = 1e-9);
        for period in &repayment {
            assert_abs_diff_eq!(period.payment(), expected, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(repayment.final_balance(), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_last_period_outside_default_bracket_leaves_balance() {
        let repayment =
            illustrative_mortgage(240_000.0, terms(&[(0.05, 299), (0.08, 1)]), 300).unwrap();

        assert_eq!(repayment.len(), 300);
        assert!(repayment.final_balance() > 1.0);
    }

    #[test]
    fn test_non_convergence_propagates() {
        let mortgage = IllustrativeMortgage::new(240_000.0, terms(&[(0.0519, 24)]), 300).unwrap();
        let config = SolverConfig::default().with_tolerance(1e-26);

        assert!(matches!(
            mortgage.calculate_with(&config),
            Err(LoanError::NonConvergence { .. })
        ));
    }
}
