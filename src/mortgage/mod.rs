//! Illustrative mortgages with rates fixed over consecutive terms

mod term;
mod illustrative;
mod request;

pub use term::{LoanTerm, LoanTermRequest};
pub use illustrative::{
    illustrative_mortgage, IllustrativeMortgage, MortgageResult, MortgageSummary, TermPayment,
};
pub use request::{MortgageRequest, MortgageResponse};
