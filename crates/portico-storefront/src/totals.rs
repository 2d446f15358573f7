//! Ephemeral order computation.

use portico_commerce::basket::BasketLine;
use portico_commerce::ids::CustomerId;
use portico_commerce::order::EphemeralOrder;
use portico_commerce::store::StoreConfig;
use portico_engine::{CreateOrderOptions, EngineError, EngineSession};

/// Builds a preview order over the basket so the cart screen can show
/// shipping costs and discounts before checkout begins.
///
/// The computation is deliberately lossy on failure: any engine problem is
/// logged and collapses to `None`, and the caller renders the basket without
/// totals. Nothing on this path may error out the cart screen.
#[derive(Debug, Default)]
pub struct CartTotalsComputer;

impl CartTotalsComputer {
    /// Create a computer.
    pub fn new() -> Self {
        Self
    }

    /// Compute an ephemeral order for the given basket lines.
    ///
    /// `customer_id` below zero means no customer is logged in; the order
    /// is then priced for the store's default customer and re-tagged with
    /// the store's guest customer id so customer-scoped promotions evaluate.
    pub fn compute(
        &self,
        session: &mut EngineSession,
        store: &StoreConfig,
        customer_id: CustomerId,
        lines: &[BasketLine],
    ) -> Option<EphemeralOrder> {
        match self.try_compute(session, store, customer_id, lines) {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(
                    store = %store.store_id,
                    customer = %customer_id,
                    error = %err,
                    "temporary cart order could not be created"
                );
                None
            }
        }
    }

    fn try_compute(
        &self,
        session: &mut EngineSession,
        store: &StoreConfig,
        customer_id: CustomerId,
        lines: &[BasketLine],
    ) -> Result<Option<EphemeralOrder>, EngineError> {
        // Drop any order left over from a previous attempt; a failure below
        // leaves the manager holding no checkout order rather than stale
        // totals.
        session.orders_mut().clear_checkout_order();

        let guest = !customer_id.is_registered();
        let options = CreateOrderOptions::for_customer(guest, &session.config().fetch);
        let session_token = if guest { None } else { session.session_token() };
        let language_id = session.config().language_id;

        let created = session.engine_mut().create_order(
            session_token.as_deref(),
            lines,
            &options,
            language_id,
        )?;
        let Some(mut order) = created else {
            return Ok(None);
        };

        // Promotions with customer expressions need a real id even for
        // guests.
        if guest {
            order.customer_id = store.guest_customer_id;
        }

        let quotes = session.engine_mut().shipping_quotes(&order)?;
        if let Some(first) = quotes.into_iter().next() {
            order.set_shipping_quote(first);
        }

        session.engine_mut().recompute_totals(&mut order)?;

        let coupon = session.orders().coupon_code().map(str::to_string);
        let gift_cert = session.orders().gift_cert_code().map(str::to_string);
        let reward_points = session.orders().reward_points();
        order.apply_saved_codes(coupon, gift_cert, reward_points);

        session.orders_mut().set_checkout_order(order.clone());
        Ok(Some(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_commerce::basket::ProductRef;
    use portico_commerce::ids::{LineId, ProductId};
    use portico_commerce::money::{Currency, Money, TaxedPrice};
    use portico_commerce::order::ShippingQuote;
    use portico_engine::{EngineConfig, InMemoryEngine};

    fn line() -> BasketLine {
        BasketLine::new(
            LineId::new(1),
            ProductRef::new(ProductId::new(10), "Widget", "widget.png"),
            2,
            TaxedPrice::new(
                Money::new(1000, Currency::USD),
                Money::new(1100, Currency::USD),
            ),
        )
        .with_stock(5)
    }

    fn store() -> StoreConfig {
        StoreConfig::new("store1", CustomerId::new(900)).with_tax_inclusive_display(true)
    }

    fn session(engine: InMemoryEngine) -> EngineSession {
        EngineSession::new(
            store().store_id,
            Box::new(engine),
            EngineConfig::default(),
        )
    }

    #[test]
    fn guest_order_gets_guest_customer_id() {
        let mut session = session(InMemoryEngine::new());
        let order = CartTotalsComputer::new()
            .compute(&mut session, &store(), CustomerId::NONE, &[line()])
            .unwrap();

        assert_eq!(order.customer_id, CustomerId::new(900));
        assert!(order.customer_id.is_registered());
    }

    #[test]
    fn first_shipping_quote_wins() {
        let engine = InMemoryEngine::new()
            .with_quote(ShippingQuote::new(
                "flat.flat",
                "Flat Rate",
                Money::new(500, Currency::USD),
            ))
            .with_quote(ShippingQuote::new(
                "express",
                "Express",
                Money::new(100, Currency::USD),
            ));
        let mut session = session(engine);

        let order = CartTotalsComputer::new()
            .compute(&mut session, &store(), CustomerId::NONE, &[line()])
            .unwrap();

        // First returned, not cheapest.
        assert_eq!(order.shipping_quote.unwrap().code, "flat.flat");
    }

    #[test]
    fn no_quotes_leaves_order_unquoted() {
        let mut session = session(InMemoryEngine::new());
        let order = CartTotalsComputer::new()
            .compute(&mut session, &store(), CustomerId::NONE, &[line()])
            .unwrap();
        assert!(order.shipping_quote.is_none());
        assert_eq!(order.totals.shipping.cents, 0);
    }

    #[test]
    fn saved_codes_reapplied() {
        let mut session = session(InMemoryEngine::new());
        session.orders_mut().set_coupon_code("SAVE10");
        session.orders_mut().set_reward_points(250);

        let order = CartTotalsComputer::new()
            .compute(&mut session, &store(), CustomerId::NONE, &[line()])
            .unwrap();

        assert_eq!(order.coupon_code.as_deref(), Some("SAVE10"));
        assert!(order.gift_cert_code.is_none());
        assert_eq!(order.reward_points, 250);
    }

    #[test]
    fn computed_order_becomes_checkout_order() {
        let mut session = session(InMemoryEngine::new());
        let order = CartTotalsComputer::new()
            .compute(&mut session, &store(), CustomerId::NONE, &[line()])
            .unwrap();
        assert_eq!(session.orders().checkout_order(), Some(&order));
    }

    #[test]
    fn declined_creation_yields_none_and_clears_state() {
        let mut session = session(InMemoryEngine::new().declining_orders());
        session
            .orders_mut()
            .set_checkout_order(EphemeralOrder::new(CustomerId::new(1), Vec::new()));

        let order =
            CartTotalsComputer::new().compute(&mut session, &store(), CustomerId::NONE, &[line()]);

        assert!(order.is_none());
        assert!(session.orders().checkout_order().is_none());
    }

    #[test]
    fn engine_failure_is_swallowed() {
        let mut session = session(InMemoryEngine::new().failing());
        let order =
            CartTotalsComputer::new().compute(&mut session, &store(), CustomerId::NONE, &[line()]);
        assert!(order.is_none());
    }

    #[test]
    fn registered_customer_keeps_own_id() {
        let engine = InMemoryEngine::new()
            .with_customer("ada", "pw", CustomerId::new(42))
            .with_current_customer(CustomerId::new(42));
        let mut session = session(engine);

        let order = CartTotalsComputer::new()
            .compute(&mut session, &store(), CustomerId::new(42), &[line()])
            .unwrap();

        assert_eq!(order.customer_id, CustomerId::new(42));
    }
}
