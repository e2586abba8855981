//! Monetary amounts stored as integer cents.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// A non-negative price in cents.
///
/// Serialized as a decimal string with two fractional digits (`"5.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Wrap a cent amount. Negative values are rejected.
    pub fn from_cents(cents: i64) -> Result<Self, CoreError> {
        if cents < 0 {
            return Err(CoreError::InvalidFormat(
                "Price must be a non-negative number".into(),
            ));
        }
        Ok(Price(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Parse a user-supplied decimal such as `"5"`, `"5.5"` or `"5.00"`.
    ///
    /// At most two fractional digits are accepted. Signs, exponents, and
    /// anything that is not plain digits are rejected.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = || {
            CoreError::InvalidFormat(format!(
                "Price must be a non-negative number with at most two decimals (got '{raw}')"
            ))
        };

        let trimmed = raw.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > 2 || !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(invalid)?
        };
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid())?,
        };

        let cents = whole_cents.checked_add(frac_cents).ok_or_else(invalid)?;
        Price::from_cents(cents)
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
