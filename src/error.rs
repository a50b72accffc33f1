//! Error types for loan simulation and mortgage calculations

use thiserror::Error;

/// Result alias used throughout the crate
pub type LoanResult<T> = Result<T, LoanError>;

/// Errors surfaced to the direct caller of a loan calculation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// Rejected at construction or entry, before any simulation work
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the rejected input
        reason: String,
    },

    /// Bisection exhausted its iteration budget
    #[error("Could not find flat payment: no convergence after {iterations} iterations (best estimate {value}, tol {tol:e})")]
    NonConvergence {
        /// Iterations consumed
        iterations: u32,
        /// Best-effort midpoint at exhaustion
        value: f64,
        /// Tolerance requested
        tol: f64,
    },

    /// Malformed mortgage request
    #[error("Invalid mortgage request: {0}")]
    Parse(String),
}

impl LoanError {
    /// Create an invalid configuration error
    pub fn invalid(reason: impl Into<String>) -> Self {
        LoanError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(err: serde_json::Error) -> Self {
        LoanError::Parse(err.to_string())
    }
}

/// Reject negative or non-finite monetary amounts
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> LoanResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LoanError::invalid(format!(
            "{} must be a non-negative finite amount, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_amounts() {
        assert!(ensure_non_negative("start_value", 0.0).is_ok());
        assert!(ensure_non_negative("start_value", 240_000.0).is_ok());
        assert!(ensure_non_negative("start_value", -1.0).is_err());
        assert!(ensure_non_negative("start_value", f64::NAN).is_err());
        assert!(ensure_non_negative("start_value", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = LoanError::invalid("Must provide at least one loan term.");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Must provide at least one loan term."
        );

        let err = LoanError::NonConvergence {
            iterations: 50,
            value: 709.5,
            tol: 1e-26,
        };
        assert!(err.to_string().starts_with("Could not find flat payment"));
    }
}
