//! Period-by-period amortization simulation

use crate::error::{ensure_non_negative, LoanError, LoanResult};
use crate::process::Process;

use super::Period;

/// When a simulation run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payoff {
    /// Run every period up to the maturity cutoff
    #[default]
    AtMaturity,
    /// Cap payments at the outstanding amount and stop once the balance reaches zero
    Early,
}

/// Lazy, finite sequence of loan periods
///
/// Each call to [`simulate`] produces a fresh run; a drained run cannot be restarted.
#[derive(Debug, Clone)]
pub struct Simulation<R, P> {
    interest_rate_process: R,
    payment_process: P,
    balance: f64,
    time_step: u32,
    repayment_period: u32,
    payoff: Payoff,
    finished: bool,
}

/// Simulate a loan from `start_value` at `time_step` up to maturity
///
/// The run stops after emitting the period whose `time_step` is
/// `repayment_period - 1`, so `repayment_period` is the absolute maturity and a
/// run starting at `time_step` yields `repayment_period - time_step` periods.
pub fn simulate<R, P>(
    start_value: f64,
    interest_rate_process: R,
    payment_process: P,
    time_step: u32,
    repayment_period: u32,
) -> LoanResult<Simulation<R, P>>
where
    R: Process,
    P: Process,
{
    validate_run(start_value, time_step, repayment_period)?;
    Ok(Simulation::unchecked(
        start_value,
        interest_rate_process,
        payment_process,
        time_step,
        repayment_period,
    ))
}

/// Check the inputs shared by every simulation entry point
pub(crate) fn validate_run(
    start_value: f64,
    time_step: u32,
    repayment_period: u32,
) -> LoanResult<()> {
    ensure_non_negative("start_value", start_value)?;
    if repayment_period == 0 {
        return Err(LoanError::invalid("repayment_period must be positive"));
    }
    if time_step >= repayment_period {
        return Err(LoanError::invalid(format!(
            "time_step {} is at or beyond maturity (repayment_period {})",
            time_step, repayment_period
        )));
    }
    Ok(())
}

impl<R: Process, P: Process> Simulation<R, P> {
    /// Caller guarantees `time_step < repayment_period`
    pub(crate) fn unchecked(
        start_value: f64,
        interest_rate_process: R,
        payment_process: P,
        time_step: u32,
        repayment_period: u32,
    ) -> Self {
        Self {
            interest_rate_process,
            payment_process,
            balance: start_value,
            time_step,
            repayment_period,
            payoff: Payoff::AtMaturity,
            finished: false,
        }
    }

    pub fn with_payoff(mut self, payoff: Payoff) -> Self {
        self.payoff = payoff;
        self
    }

    fn next_period(&self) -> Period {
        let interest = self.balance * self.interest_rate_process.step(self.time_step);
        let payment = self.payment_process.step(self.time_step);
        match self.payoff {
            Payoff::AtMaturity => Period::new(self.time_step, self.balance, interest, payment),
            Payoff::Early => Period::settling(self.time_step, self.balance, interest, payment),
        }
    }
}

impl<R: Process, P: Process> Iterator for Simulation<R, P> {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        if self.finished {
            return None;
        }

        let period = self.next_period();

        let loan_repaid = self.payoff == Payoff::Early && period.end_value() == 0.0;
        let loan_mature = period.time_step() >= self.repayment_period - 1;
        if loan_repaid || loan_mature {
            self.finished = true;
        } else {
            self.time_step += 1;
            self.balance = period.end_value();
        }

        Some(period)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = (self.repayment_period - self.time_step) as usize;
        match self.payoff {
            Payoff::AtMaturity => (remaining, Some(remaining)),
            Payoff::Early => (1, Some(remaining)),
        }
    }
}

impl<R: Process, P: Process> std::iter::FusedIterator for Simulation<R, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ConstantValue;

    fn constant(value: f64) -> ConstantValue {
        ConstantValue::new(value).unwrap()
    }

    #[test]
    fn test_loan_length() {
        for &payment in &[7.0, 6.0] {
            let periods: Vec<Period> = simulate(100.0, constant(0.05), constant(payment), 0, 25)
                .unwrap()
                .collect();
            assert_eq!(periods.len(), 25);
            assert_eq!(periods[0].time_step(), 0);
            assert_eq!(periods[24].time_step(), 24);
        }
    }

    #[test]
    fn test_balance_rolls_forward() {
        let periods: Vec<Period> = simulate(100.0, 0.05, 7.0, 0, 3).unwrap().collect();

        assert_eq!(periods[0].start_value(), 100.0);
        assert_eq!(periods[0].interest(), 5.0);
        assert_eq!(periods[0].end_value(), 98.0);
        assert_eq!(periods[1].start_value(), 98.0);
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start_value(), pair[0].end_value());
            assert_eq!(pair[1].time_step(), pair[0].time_step() + 1);
        }
    }

    #[test]
    fn test_single_period() {
        let periods: Vec<Period> = simulate(100.0, 0.0, 10.0, 0, 1).unwrap().collect();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].end_value(), 90.0);
    }

    #[test]
    fn test_offset_start_runs_to_maturity() {
        let simulation = simulate(1_000.0, 0.01, 50.0, 24, 300).unwrap();
        assert_eq!(simulation.size_hint(), (276, Some(276)));

        let periods: Vec<Period> = simulation.collect();
        assert_eq!(periods.len(), 276);
        assert_eq!(periods[0].time_step(), 24);
        assert_eq!(periods.last().unwrap().time_step(), 299);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(simulate(100.0, 0.05, 7.0, 0, 0).is_err());
        assert!(simulate(100.0, 0.05, 7.0, 25, 25).is_err());
        assert!(simulate(-100.0, 0.05, 7.0, 0, 25).is_err());
    }

    #[test]
    fn test_low_payment_is_clamped_not_rejected() {
        let periods: Vec<Period> = simulate(100.0, 0.05, 1.0, 0, 10).unwrap().collect();
        for period in &periods {
            assert!(period.payment() >= period.interest());
            assert_eq!(period.end_value(), 100.0);
        }
    }

    #[test]
    fn test_overpayment_runs_negative_at_maturity() {
        let periods: Vec<Period> = simulate(100.0, 0.0, 60.0, 0, 3).unwrap().collect();
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[2].end_value(), -80.0);
    }

    #[test]
    fn test_early_payoff() {
        let periods: Vec<Period> = simulate(100.0, 0.0, 60.0, 0, 25)
            .unwrap()
            .with_payoff(Payoff::Early)
            .collect();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1].payment(), 40.0);
        assert_eq!(periods[1].end_value(), 0.0);
    }

    #[test]
    fn test_early_payoff_still_stops_at_maturity() {
        let periods: Vec<Period> = simulate(100.0, 0.05, 7.0, 0, 25)
            .unwrap()
            .with_payoff(Payoff::Early)
            .collect();
        assert_eq!(periods.len(), 25);
    }

    #[test]
    fn test_fresh_run_per_call() {
        let first: Vec<Period> = simulate(100.0, 0.05, 7.0, 0, 5).unwrap().collect();
        let second: Vec<Period> = simulate(100.0, 0.05, 7.0, 0, 5).unwrap().collect();
        assert_eq!(first, second);

        let mut run = simulate(100.0, 0.05, 7.0, 0, 1).unwrap();
        assert!(run.next().is_some());
        assert!(run.next().is_none());
        assert!(run.next().is_none());
    }
}
