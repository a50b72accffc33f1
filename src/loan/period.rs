//! A single simulated loan period

use serde::{Deserialize, Serialize, Serializer};
use serde::ser::SerializeStruct;

/// Effective payment for a period: never below the interest charge
pub fn clamp_payment(requested: f64, interest: f64) -> f64 {
    requested.max(interest)
}

/// Effective payment when a loan may be settled early
///
/// Covers at least the interest and at most the full outstanding amount,
/// so the balance lands exactly on zero instead of overshooting.
pub fn settle_payment(requested: f64, start_value: f64, interest: f64) -> f64 {
    clamp_payment(requested, interest).min(start_value + interest)
}

/// One period of a loan repayment
///
/// Payments are non-negative amounts that reduce the balance. The ending
/// balance is always derived from the other fields.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawPeriod")]
pub struct Period {
    time_step: u32,
    start_value: f64,
    interest: f64,
    payment: f64,
}

/// Wire form of a period; `end_value` is ignored on the way in
#[derive(Deserialize)]
struct RawPeriod {
    time_step: u32,
    start_value: f64,
    interest: f64,
    payment: f64,
}

impl From<RawPeriod> for Period {
    fn from(raw: RawPeriod) -> Self {
        Period::new(raw.time_step, raw.start_value, raw.interest, raw.payment)
    }
}

impl Period {
    /// Build a period, raising the payment to cover at least the interest charge
    pub fn new(time_step: u32, start_value: f64, interest: f64, payment: f64) -> Self {
        Self {
            time_step,
            start_value,
            interest,
            payment: clamp_payment(payment, interest),
        }
    }

    /// Build a period whose payment is also capped at what clears the balance
    pub fn settling(time_step: u32, start_value: f64, interest: f64, payment: f64) -> Self {
        Self {
            time_step,
            start_value,
            interest,
            payment: settle_payment(payment, start_value, interest),
        }
    }

    pub fn time_step(&self) -> u32 {
        self.time_step
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn interest(&self) -> f64 {
        self.interest
    }

    /// Effective payment after clamping
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Balance after interest is charged and the payment applied
    pub fn end_value(&self) -> f64 {
        self.start_value + self.interest - self.payment
    }

    /// Portion of the payment that reduced the balance
    pub fn principal(&self) -> f64 {
        self.payment - self.interest
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Period", 5)?;
        state.serialize_field("time_step", &self.time_step)?;
        state.serialize_field("start_value", &self.start_value)?;
        state.serialize_field("interest", &self.interest)?;
        state.serialize_field("payment", &self.payment)?;
        state.serialize_field("end_value", &self.end_value())?;
        state.end()
    }
}
