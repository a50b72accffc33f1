//! Mortgage System - Amortization engine for illustrative multi-term mortgages
//!
//! This library provides:
//! - Period-by-period loan simulation under rate and payment processes
//! - Flat-payment solving by bisection
//! - Multi-term mortgages that re-solve the payment at each rate change
//! - Rate conversion between compounding periods

pub mod error;
pub mod rates;
pub mod process;
pub mod roots;
pub mod loan;
pub mod mortgage;

// Re-export commonly used types
pub use error::{LoanError, LoanResult};
pub use rates::{convert_rate, RateConversion};
pub use process::{ConstantValue, Process};
pub use roots::{bisect, Root};
pub use loan::{find_flat_payment, simulate, Period, Schedule, SolverConfig};
pub use mortgage::{illustrative_mortgage, IllustrativeMortgage, LoanTerm, MortgageRequest};
