//! Ephemeral preview orders, totals and shipping quotes.

use crate::basket::BasketLine;
use crate::ids::CustomerId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A priced shipping option quoted by the engine for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Engine-side quote code, e.g. "flat.flat".
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Quoted cost.
    pub cost: Money,
}

impl ShippingQuote {
    /// Create a quote.
    pub fn new(code: impl Into<String>, description: impl Into<String>, cost: Money) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            cost,
        }
    }
}

/// Totals computed for an order by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrderTotals {
    /// Sum of line prices before tax.
    pub subtotal: Money,
    /// Tax on the order.
    pub tax: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Discounts (coupons, gift certificates, reward points).
    pub discount: Money,
    /// Grand total.
    pub total: Money,
}

/// A non-persisted order computed for cart preview.
///
/// Created fresh on every totals computation; it exists so the cart screen
/// can show shipping and discounts before checkout begins, and is never
/// submitted to the engine as a real order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemeralOrder {
    /// Customer the order prices for. Guest orders are overwritten with the
    /// store's guest customer id before promotion evaluation.
    pub customer_id: CustomerId,
    /// The basket lines the order was built from.
    pub lines: Vec<BasketLine>,
    /// Coupon code applied, if any.
    pub coupon_code: Option<String>,
    /// Gift-certificate code applied, if any.
    pub gift_cert_code: Option<String>,
    /// Redeemed reward points.
    pub reward_points: i64,
    /// Selected shipping quote, if any was returned.
    pub shipping_quote: Option<ShippingQuote>,
    /// Totals, recomputed in place by the engine.
    pub totals: OrderTotals,
}

impl EphemeralOrder {
    /// Create an order over the given lines.
    pub fn new(customer_id: CustomerId, lines: Vec<BasketLine>) -> Self {
        Self {
            customer_id,
            lines,
            coupon_code: None,
            gift_cert_code: None,
            reward_points: 0,
            shipping_quote: None,
            totals: OrderTotals::default(),
        }
    }

    /// Select a shipping quote.
    pub fn set_shipping_quote(&mut self, quote: ShippingQuote) {
        self.shipping_quote = Some(quote);
    }

    /// Apply the session's saved coupon, gift-certificate and reward-point
    /// state onto the order.
    pub fn apply_saved_codes(
        &mut self,
        coupon_code: Option<String>,
        gift_cert_code: Option<String>,
        reward_points: i64,
    ) {
        self.coupon_code = coupon_code;
        self.gift_cert_code = gift_cert_code;
        self.reward_points = reward_points;
    }
}
