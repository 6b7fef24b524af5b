//! Money type for displaying and summing prices.
//!
//! The catalog sends prices as decimal numbers. They are converted to whole
//! cents once at the boundary so that sums and multiplications stay exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// An amount in the store's single currency, held as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self { amount_cents: 0 }
    }

    /// Convert a decimal catalog price, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::zero();
        }
        Self {
            amount_cents: (amount * 100.0).round() as i64,
        }
    }

    /// The amount as a decimal number.
    pub fn as_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Check if zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Format for display, e.g. `$12.34`.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money::new(self.amount_cents.saturating_mul(i64::from(quantity)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}
