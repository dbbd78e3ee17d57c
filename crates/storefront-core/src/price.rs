//! # Price Normalization
//!
//! Catalog prices are not uniform. Some products carry a plain number
//! (`1299`), others a display string (`"$299.99"`, `"₹1,299"`). Both are kept
//! exactly as they arrived so the persisted cart round-trips unchanged, and
//! both are normalized to [`Money`] whenever a total is derived.
//!
//! ## Normalization Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "₹1,299.50 only"                                                       │
//! │       │  1. drop every char that is not 0-9 . -                         │
//! │       ▼                                                                 │
//! │  "1299.50"                                                              │
//! │       │  2. take the longest leading  -?digits[.digits]                 │
//! │       ▼                                                                 │
//! │  Decimal 1299.50                                                        │
//! │       │  3. round to 2 dp, store as minor units                         │
//! │       ▼                                                                 │
//! │  Money(129950)                                                          │
//! │                                                                         │
//! │  Nothing numeric left ("N/A", "-", "") → None → line is skipped         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A product price as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// A numeric amount in major units (`10`, `299.99`).
    Amount(#[serde(with = "rust_decimal::serde::float")] Decimal),

    /// A currency-formatted display string (`"$5.50"`).
    Formatted(String),
}

impl Price {
    /// Creates a numeric price from minor units.
    pub fn from_minor(minor: i64) -> Self {
        Price::Amount(Decimal::new(minor, 2))
    }

    /// Creates a numeric price from whole major units.
    pub fn from_major(major: i64) -> Self {
        Price::Amount(Decimal::from(major))
    }

    /// Normalizes the price to minor units.
    ///
    /// ```rust
    /// use storefront_core::price::Price;
    ///
    /// let p = Price::Formatted("$5.50".to_string());
    /// assert_eq!(p.normalize().unwrap().minor(), 550);
    ///
    /// assert!(Price::Formatted("call us".to_string()).normalize().is_none());
    /// ```
    pub fn normalize(&self) -> Option<Money> {
        match self {
            Price::Amount(amount) => Money::from_decimal(*amount),
            Price::Formatted(text) => parse_formatted(text).and_then(Money::from_decimal),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{}", amount),
            Price::Formatted(text) => f.write_str(text),
        }
    }
}

impl From<Money> for Price {
    fn from(money: Money) -> Self {
        Price::Amount(money.to_decimal())
    }
}

impl From<&str> for Price {
    fn from(text: &str) -> Self {
        Price::Formatted(text.to_string())
    }
}

/// Parses a currency-formatted string into a decimal amount.
fn parse_formatted(text: &str) -> Option<Decimal> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let number = leading_number(&stripped)?;
    match number.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => Decimal::from_str(&format!("-0{}", rest)).ok(),
        _ if number.starts_with('.') => Decimal::from_str(&format!("0{}", number)).ok(),
        _ => Decimal::from_str(number).ok(),
    }
}

/// Returns the longest prefix of `s` shaped like `-?digits[.digits]`.
///
/// A fraction with no integer part (`".5"`) is accepted, a bare sign or a bare
/// dot is not.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let int_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    if int_digits == 0 && bytes.get(int_start) != Some(&b'.') {
        return None;
    }
    if end == int_start {
        return None;
    }

    s.get(..end)
}

// =============================================================================
// Unit Tests
// =============================================================================
