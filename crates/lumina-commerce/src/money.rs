//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so cart totals add up exactly.
//! Arithmetic saturates instead of overflowing: cart operations are total and
//! must not fail on absurd quantities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    CAD,
    GBP,
    AUD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::CAD => "CAD",
            Currency::GBP => "GBP",
            Currency::AUD => "AUD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::CAD => "CA$",
            Currency::GBP => "\u{00a3}",
            Currency::AUD => "A$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "CAD" => Some(Currency::CAD),
            "GBP" => Some(Currency::GBP),
            "AUD" => Some(Currency::AUD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use lumina_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(122.5, Currency::USD);
    /// assert_eq!(price.amount_cents, 12250);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$201.50").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "201.50").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }

    /// Add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Subtract another Money value, returning None if currencies don't match.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a quantity and a whole-number percentage.
    ///
    /// `scale(3, 250)` is 2.5 times three units. The result is rounded half
    /// away from zero to the cent and saturates at the `i64` range.
    pub fn scale(&self, quantity: i64, percent: i64) -> Money {
        let raw = (self.amount_cents as i128)
            .checked_mul(quantity as i128)
            .and_then(|v| v.checked_mul(percent as i128));
        let rounded = match raw {
            Some(raw) if raw >= 0 => (raw + 50) / 100,
            Some(raw) => (raw - 50) / 100,
            None if (self.amount_cents < 0) ^ (quantity < 0) ^ (percent < 0) => i128::MIN,
            None => i128::MAX,
        };
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Money::new(clamped, self.currency)
    }

    /// Multiply by a decimal factor (e.g., a discount rate), rounding to the cent.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(20150, Currency::USD).display(), "$201.50");
        assert_eq!(Money::new(5, Currency::GBP).display(), "\u{00a3}0.05");
        assert_eq!(Money::new(-4030, Currency::USD).display_amount(), "-40.30");
    }

    #[test]
    fn test_scale_by_percent() {
        let m = Money::new(4900, Currency::USD);
        assert_eq!(m.scale(1, 250).amount_cents, 12250);
        assert_eq!(m.scale(3, 100).amount_cents, 14700);
    }

    #[test]
    fn test_scale_rounds_half_cents_up() {
        // 49.99 * 2.5 = 124.975
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.scale(1, 250).amount_cents, 12498);
    }

    #[test]
    fn test_scale_saturates() {
        let m = Money::new(i64::MAX / 2, Currency::USD);
        assert_eq!(m.scale(i64::MAX, 250).amount_cents, i64::MAX);
    }

    #[test]
    fn test_multiply_decimal() {
        let m = Money::new(20150, Currency::USD);
        assert_eq!(m.multiply_decimal(0.20).amount_cents, 4030);
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
        assert!(usd.try_subtract(&eur).is_none());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("JPY"), None);
    }
}
