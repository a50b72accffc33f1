//! Loan repayment simulation and flat-payment solving
//!
//! | Period | Starting Loan | Interest | Payment | Ending Loan |
//! |-------:|--------------:|---------:|--------:|------------:|
//! |       0|            100|         5|        7|           98|
//! |       1|             98|       4.9|        7|         95.9|

mod period;
mod schedule;
mod simulate;
mod flat_payment;

pub use period::{Period, clamp_payment, settle_payment};
pub use schedule::Schedule;
pub use simulate::{simulate, Simulation, Payoff};
pub use flat_payment::{
    find_flat_payment, summarize_flat_payment, FlatPayment, SolverConfig, DEFAULT_TOLERANCE,
};
