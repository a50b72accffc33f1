//! Ordered repayment schedules and their aggregates

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::Period;

/// Ordered sequence of loan periods
///
/// Index is the position in the sequence, which differs from `time_step` when
/// the schedule does not start at time step zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    periods: Vec<Period>,
}

impl Schedule {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    pub fn first(&self) -> Option<&Period> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&Period> {
        self.periods.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    /// Total interest charged across all periods
    pub fn interest(&self) -> f64 {
        self.periods.iter().map(|p| p.interest()).sum()
    }

    /// Total cash paid across all periods
    pub fn total(&self) -> f64 {
        self.periods.iter().map(|p| p.payment()).sum()
    }

    /// Balance left after the final period
    pub fn final_balance(&self) -> f64 {
        self.last().map(|p| p.end_value()).unwrap_or(0.0)
    }

    /// New schedule holding the first `len` periods
    pub fn truncated(&self, len: usize) -> Schedule {
        let end = len.min(self.periods.len());
        Schedule::new(self.periods[..end].to_vec())
    }

    /// New schedule with `tail` appended after these periods
    pub fn extended<I>(&self, tail: I) -> Schedule
    where
        I: IntoIterator<Item = Period>,
    {
        let mut periods = self.periods.clone();
        periods.extend(tail);
        Schedule::new(periods)
    }
}

impl Index<usize> for Schedule {
    type Output = Period;

    fn index(&self, index: usize) -> &Period {
        &self.periods[index]
    }
}

impl FromIterator<Period> for Schedule {
    fn from_iter<I: IntoIterator<Item = Period>>(iter: I) -> Self {
        Schedule::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Schedule {
    type Item = Period;
    type IntoIter = std::vec::IntoIter<Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
