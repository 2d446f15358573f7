//! Monetary values.
//!
//! Amounts are stored in the smallest currency unit (cents) to avoid
//! floating-point drift in totals arithmetic. `TaxedPrice` pairs the
//! tax-exclusive and tax-inclusive variants of a price so display code can
//! pick one according to the store's preference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Currency code, e.g. "USD".
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Currency symbol, e.g. "$".
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in the smallest unit of its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create an amount from cents.
    pub const fn new(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// A zero amount.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Add another amount; `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.cents.checked_add(other.cents)?, self.currency))
    }

    /// Subtract another amount; `None` on currency mismatch or overflow.
    pub fn try_sub(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.cents.checked_sub(other.cents)?, self.currency))
    }

    /// Multiply by a quantity; `None` on overflow.
    pub fn try_mul(&self, quantity: i64) -> Option<Money> {
        Some(Money::new(self.cents.checked_mul(quantity)?, self.currency))
    }

    /// Sum an iterator of amounts in one currency; `None` on mismatch or
    /// overflow.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut total = Money::zero(currency);
        for m in iter {
            total = total.try_add(m)?;
        }
        Some(total)
    }

    /// Format for display, e.g. "$49.99".
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / 100,
            abs % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A price carried in both tax-exclusive and tax-inclusive form.
///
/// The engine quotes both; which one reaches the screen depends on the
/// store's display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxedPrice {
    /// Price excluding tax.
    pub ex_tax: Money,
    /// Price including tax.
    pub inc_tax: Money,
}

impl TaxedPrice {
    /// Create a price pair.
    pub const fn new(ex_tax: Money, inc_tax: Money) -> Self {
        Self { ex_tax, inc_tax }
    }

    /// Create a pair where both variants are the same untaxed amount.
    pub const fn untaxed(amount: Money) -> Self {
        Self {
            ex_tax: amount,
            inc_tax: amount,
        }
    }

    /// Select the variant for display.
    pub fn for_display(&self, tax_inclusive: bool) -> Money {
        if tax_inclusive {
            self.inc_tax
        } else {
            self.ex_tax
        }
    }

    /// The tax portion of the price.
    pub fn tax(&self) -> Option<Money> {
        self.inc_tax.try_sub(&self.ex_tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(5, Currency::EUR).display(), "\u{20ac}0.05");
        assert_eq!(Money::new(-250, Currency::USD).display(), "-$2.50");
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().cents, 1500);
        assert_eq!(a.try_sub(&b).unwrap().cents, 500);
        assert_eq!(b.try_mul(3).unwrap().cents, 1500);
    }

    #[test]
    fn money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
        assert!(usd.try_sub(&eur).is_none());
    }

    #[test]
    fn money_sum() {
        let amounts = [Money::new(100, Currency::USD), Money::new(250, Currency::USD)];
        let total = Money::try_sum(amounts.iter(), Currency::USD).unwrap();
        assert_eq!(total.cents, 350);
    }

    #[test]
    fn taxed_price_selection() {
        let price = TaxedPrice::new(
            Money::new(1000, Currency::USD),
            Money::new(1100, Currency::USD),
        );
        assert_eq!(price.for_display(true).cents, 1100);
        assert_eq!(price.for_display(false).cents, 1000);
        assert_eq!(price.tax().unwrap().cents, 100);
    }
}
