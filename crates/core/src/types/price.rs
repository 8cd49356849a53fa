//! Type-safe price representation.
//!
//! Prices are stored in minor currency units as non-negative integers. The
//! shop currency is VND, which has no fractional unit, so one unit equals
//! one đồng. Arithmetic is explicit and checked - totals are computed once
//! at order time and never silently wrap.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in minor currency units (đồng).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Add another price, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Format for display with Vietnamese digit grouping, e.g. `29.900.000 ₫`.
    #[must_use]
    pub fn display_vnd(self) -> String {
        format!("{} ₫", group_digits(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Group digits with `.` separators (vi-VN convention).
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_mul() {
        let price = Price::new(29_900_000);
        assert_eq!(price.checked_mul(2), Some(Price::new(59_800_000)));
        assert_eq!(Price::new(u64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_checked_add() {
        let a = Price::new(100);
        let b = Price::new(50);
        assert_eq!(a.checked_add(b), Some(Price::new(150)));
        assert_eq!(Price::new(u64::MAX).checked_add(Price::new(1)), None);
    }

    #[test]
    fn test_display_vnd_grouping() {
        assert_eq!(Price::new(0).display_vnd(), "0 ₫");
        assert_eq!(Price::new(999).display_vnd(), "999 ₫");
        assert_eq!(Price::new(5_900_000).display_vnd(), "5.900.000 ₫");
        assert_eq!(Price::new(29_900_000).display_vnd(), "29.900.000 ₫");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(7_900_000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "7900000");
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
