//! In-process engine implementation.
//!
//! Stands in for the real engine transport in tests and demos. Behavior is
//! configured up front with the `with_*` builders; totals math is
//! deterministic so assertions can be exact.

use crate::client::CommerceEngine;
use crate::error::EngineError;
use crate::options::CreateOrderOptions;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use portico_commerce::basket::{Basket, BasketLine};
use portico_commerce::ids::{CustomerId, ProductId};
use portico_commerce::money::{Currency, Money};
use portico_commerce::order::{EphemeralOrder, OrderTotals, ShippingQuote};
use rand::Rng;
use std::collections::HashMap;

/// Value of one redeemed reward point, in cents.
const REWARD_POINT_CENTS: i64 = 1;

struct Account {
    credential: String,
    customer_id: CustomerId,
}

/// An in-memory [`CommerceEngine`].
pub struct InMemoryEngine {
    accounts: HashMap<String, Account>,
    current: CustomerId,
    token: Option<String>,
    basket: Basket,
    stock: HashMap<ProductId, i64>,
    quotes: Vec<ShippingQuote>,
    coupon_discounts: HashMap<String, Money>,
    currency: Currency,
    decline_orders: bool,
    failing: bool,
}

impl InMemoryEngine {
    /// Create an engine with no customers and an empty basket.
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            current: CustomerId::NONE,
            token: None,
            basket: Basket::new(),
            stock: HashMap::new(),
            quotes: Vec::new(),
            coupon_discounts: HashMap::new(),
            currency: Currency::USD,
            decline_orders: false,
            failing: false,
        }
    }

    /// Register a customer account.
    pub fn with_customer(
        mut self,
        username: impl Into<String>,
        credential: impl Into<String>,
        customer_id: CustomerId,
    ) -> Self {
        self.accounts.insert(
            username.into(),
            Account {
                credential: credential.into(),
                customer_id,
            },
        );
        self
    }

    /// Start with an already-authenticated engine session.
    pub fn with_current_customer(mut self, customer_id: CustomerId) -> Self {
        self.current = customer_id;
        self.token = Some(generate_token());
        self
    }

    /// Seed the current customer's basket.
    pub fn with_basket_line(mut self, line: BasketLine) -> Self {
        self.basket.push(line);
        self
    }

    /// Seed live stock for a product.
    pub fn with_stock(mut self, product_id: ProductId, quantity_in_stock: i64) -> Self {
        self.stock.insert(product_id, quantity_in_stock);
        self
    }

    /// Add a shipping quote, in engine preference order.
    pub fn with_quote(mut self, quote: ShippingQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Register a coupon discount.
    pub fn with_coupon_discount(mut self, code: impl Into<String>, amount: Money) -> Self {
        self.coupon_discounts.insert(code.into(), amount);
        self
    }

    /// Decline all order creation, as the engine may for an unpriceable
    /// basket.
    pub fn declining_orders(mut self) -> Self {
        self.decline_orders = true;
        self
    }

    /// Fail every call with a transport error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn check_transport(&self) -> Result<(), EngineError> {
        if self.failing {
            Err(EngineError::Transport("engine unreachable".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CommerceEngine for InMemoryEngine {
    fn basket_lines(&mut self) -> Result<Vec<BasketLine>, EngineError> {
        self.check_transport()?;
        Ok(self.basket.lines.clone())
    }

    fn refresh_basket_stock(
        &mut self,
        lines: &[BasketLine],
    ) -> Result<Vec<BasketLine>, EngineError> {
        self.check_transport()?;
        Ok(lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                if let Some(product) = &line.product {
                    if let Some(stock) = self.stock.get(&product.id) {
                        line.quantity_in_stock = *stock;
                    }
                }
                line
            })
            .collect())
    }

    fn create_order(
        &mut self,
        _session_token: Option<&str>,
        lines: &[BasketLine],
        options: &CreateOrderOptions,
        _language_id: i32,
    ) -> Result<Option<EphemeralOrder>, EngineError> {
        self.check_transport()?;
        if self.decline_orders {
            return Ok(None);
        }
        let customer_id = if options.use_default_customer {
            CustomerId::NONE
        } else {
            self.current
        };
        Ok(Some(EphemeralOrder::new(customer_id, lines.to_vec())))
    }

    fn shipping_quotes(
        &mut self,
        _order: &EphemeralOrder,
    ) -> Result<Vec<ShippingQuote>, EngineError> {
        self.check_transport()?;
        Ok(self.quotes.clone())
    }

    fn recompute_totals(&mut self, order: &mut EphemeralOrder) -> Result<(), EngineError> {
        self.check_transport()?;
        let currency = self.currency;
        let overflow = || EngineError::Rejected("totals overflow".into());

        let subtotal = Money::try_sum(order.lines.iter().map(|l| &l.price.ex_tax), currency)
            .ok_or_else(overflow)?;
        let inc = Money::try_sum(order.lines.iter().map(|l| &l.price.inc_tax), currency)
            .ok_or_else(overflow)?;
        let tax = inc.try_sub(&subtotal).ok_or_else(overflow)?;
        let shipping = order
            .shipping_quote
            .as_ref()
            .map(|q| q.cost)
            .unwrap_or_else(|| Money::zero(currency));

        let mut discount = Money::zero(currency);
        if let Some(code) = &order.coupon_code {
            if let Some(amount) = self.coupon_discounts.get(code) {
                discount = discount.try_add(amount).ok_or_else(overflow)?;
            }
        }
        if order.reward_points > 0 {
            let points = Money::new(order.reward_points * REWARD_POINT_CENTS, currency);
            discount = discount.try_add(&points).ok_or_else(overflow)?;
        }

        let total = subtotal
            .try_add(&tax)
            .and_then(|t| t.try_add(&shipping))
            .and_then(|t| t.try_sub(&discount))
            .ok_or_else(overflow)?;

        order.totals = OrderTotals {
            subtotal,
            tax,
            shipping,
            discount,
            total,
        };
        Ok(())
    }

    fn login(&mut self, username: &str, credential: &str) -> Result<bool, EngineError> {
        self.check_transport()?;
        match self.accounts.get(username) {
            Some(account) if account.credential == credential => {
                self.current = account.customer_id;
                self.token = Some(generate_token());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn login_by_id(&mut self, customer_id: CustomerId) -> Result<bool, EngineError> {
        self.check_transport()?;
        let known = self
            .accounts
            .values()
            .any(|a| a.customer_id == customer_id);
        if known {
            self.current = customer_id;
            self.token = Some(generate_token());
        }
        Ok(known)
    }

    fn logout(&mut self) -> Result<(), EngineError> {
        self.check_transport()?;
        self.current = CustomerId::NONE;
        self.token = None;
        Ok(())
    }

    fn current_customer_id(&self) -> CustomerId {
        self.current
    }

    fn session_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Generate an engine session token.
fn generate_token() -> String {
    let bytes: [u8; 18] = rand::thread_rng().gen();
    format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_commerce::basket::ProductRef;
    use portico_commerce::ids::LineId;
    use portico_commerce::money::TaxedPrice;

    fn engine_with_line() -> InMemoryEngine {
        InMemoryEngine::new()
            .with_basket_line(
                BasketLine::new(
                    LineId::new(1),
                    ProductRef::new(ProductId::new(10), "Widget", "widget.png"),
                    2,
                    TaxedPrice::new(
                        Money::new(2000, Currency::USD),
                        Money::new(2200, Currency::USD),
                    ),
                )
                .with_stock(1),
            )
            .with_stock(ProductId::new(10), 5)
    }

    #[test]
    fn login_rejects_bad_credential() {
        let mut engine = InMemoryEngine::new().with_customer("ada", "pw", CustomerId::new(42));
        assert!(!engine.login("ada", "wrong").unwrap());
        assert_eq!(engine.current_customer_id(), CustomerId::NONE);
        assert!(engine.login("ada", "pw").unwrap());
        assert_eq!(engine.current_customer_id(), CustomerId::new(42));
    }

    #[test]
    fn login_by_id_skips_credential() {
        let mut engine = InMemoryEngine::new().with_customer("ada", "pw", CustomerId::new(42));
        assert!(engine.login_by_id(CustomerId::new(42)).unwrap());
        assert!(!engine.login_by_id(CustomerId::new(99)).unwrap());
    }

    #[test]
    fn refresh_updates_stock() {
        let mut engine = engine_with_line();
        let lines = engine.basket_lines().unwrap();
        assert_eq!(lines[0].quantity_in_stock, 1);
        let refreshed = engine.refresh_basket_stock(&lines).unwrap();
        assert_eq!(refreshed[0].quantity_in_stock, 5);
    }

    #[test]
    fn declined_order_creation_returns_none() {
        let mut engine = engine_with_line().declining_orders();
        let lines = engine.basket_lines().unwrap();
        let order = engine
            .create_order(None, &lines, &CreateOrderOptions::default(), 0)
            .unwrap();
        assert!(order.is_none());
    }

    #[test]
    fn totals_include_quote_and_coupon() {
        let mut engine = engine_with_line()
            .with_coupon_discount("SAVE10", Money::new(1000, Currency::USD));
        let lines = engine.basket_lines().unwrap();
        let mut order = engine
            .create_order(None, &lines, &CreateOrderOptions::default(), 0)
            .unwrap()
            .unwrap();
        order.set_shipping_quote(ShippingQuote::new(
            "flat.flat",
            "Flat Rate",
            Money::new(500, Currency::USD),
        ));
        order.coupon_code = Some("SAVE10".into());

        engine.recompute_totals(&mut order).unwrap();
        assert_eq!(order.totals.subtotal.cents, 2000);
        assert_eq!(order.totals.tax.cents, 200);
        assert_eq!(order.totals.shipping.cents, 500);
        assert_eq!(order.totals.discount.cents, 1000);
        assert_eq!(order.totals.total.cents, 1700);
    }

    #[test]
    fn transport_failure_surfaces() {
        let mut engine = InMemoryEngine::new().failing();
        assert!(matches!(
            engine.basket_lines(),
            Err(EngineError::Transport(_))
        ));
    }
}
