//! Session-scoped checkout-order state.

use portico_commerce::order::EphemeralOrder;
use serde::{Deserialize, Serialize};

/// Order state owned by one engine session.
///
/// Holds the current checkout (preview) order plus the coupon,
/// gift-certificate and reward-point values the customer entered earlier in
/// the session. Totals computation re-applies these onto every fresh order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderManager {
    checkout_order: Option<EphemeralOrder>,
    coupon_code: Option<String>,
    gift_cert_code: Option<String>,
    reward_points: i64,
}

impl OrderManager {
    /// Create empty order state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current checkout order, if one has been computed.
    pub fn checkout_order(&self) -> Option<&EphemeralOrder> {
        self.checkout_order.as_ref()
    }

    /// Replace the checkout order.
    pub fn set_checkout_order(&mut self, order: EphemeralOrder) {
        self.checkout_order = Some(order);
    }

    /// Drop the checkout order so stale totals never leak into a new
    /// computation.
    pub fn clear_checkout_order(&mut self) {
        self.checkout_order = None;
    }

    /// The saved coupon code.
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// Save a coupon code for the session.
    pub fn set_coupon_code(&mut self, code: impl Into<String>) {
        self.coupon_code = Some(code.into());
    }

    /// The saved gift-certificate code.
    pub fn gift_cert_code(&self) -> Option<&str> {
        self.gift_cert_code.as_deref()
    }

    /// Save a gift-certificate code for the session.
    pub fn set_gift_cert_code(&mut self, code: impl Into<String>) {
        self.gift_cert_code = Some(code.into());
    }

    /// The reward points the customer chose to redeem.
    pub fn reward_points(&self) -> i64 {
        self.reward_points
    }

    /// Save redeemed reward points for the session.
    pub fn set_reward_points(&mut self, points: i64) {
        self.reward_points = points;
    }
}
