//! Cart screen composition.

use crate::project::{BasketProjector, CartItemView};
use crate::totals::CartTotalsComputer;
use portico_commerce::ids::CustomerId;
use portico_commerce::order::EphemeralOrder;
use portico_commerce::store::StoreConfig;
use portico_engine::EngineSession;

/// Everything the cart screen renders.
#[derive(Debug, Default)]
pub struct CartView {
    /// Display-ready item records, keyed by line id.
    pub items: Vec<CartItemView>,
    /// The preview order with totals; `None` when the basket is empty or
    /// the computation degraded.
    pub order: Option<EphemeralOrder>,
    /// The coupon code saved earlier in the session, if any.
    pub coupon_code: Option<String>,
    /// The gift-certificate code saved earlier in the session, if any.
    pub gift_cert_code: Option<String>,
    /// Redeemed reward points, surfaced only when nonzero.
    pub reward_points: Option<i64>,
}

/// Builds the cart view: refresh the basket, project it, compute preview
/// totals, and surface the session's saved discount state.
#[derive(Debug, Default)]
pub struct CartScreen {
    projector: BasketProjector,
    totals: CartTotalsComputer,
}

impl CartScreen {
    /// Create a cart screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the cart for the reconciled customer.
    ///
    /// Engine failures never escape: a failed refresh renders an empty
    /// cart, a failed totals computation renders items without totals.
    pub fn render(
        &self,
        session: &mut EngineSession,
        store: &StoreConfig,
        customer_id: CustomerId,
    ) -> CartView {
        let lines = match session.engine_mut().basket_lines() {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(store = %store.store_id, error = %err, "unable to display the cart");
                return CartView::default();
            }
        };
        if lines.is_empty() {
            return CartView::default();
        }

        let refreshed = match self.projector.refresh(session, &lines) {
            Ok(refreshed) => refreshed,
            Err(err) => {
                tracing::warn!(store = %store.store_id, error = %err, "unable to display the cart");
                return CartView::default();
            }
        };

        let order = self
            .totals
            .compute(session, store, customer_id, &refreshed);

        let items = self.projector.project(&refreshed, store);

        let coupon_code = session.orders().coupon_code().map(str::to_string);
        let gift_cert_code = session.orders().gift_cert_code().map(str::to_string);
        let reward_points = match session.orders().reward_points() {
            0 => None,
            points => Some(points),
        };

        CartView {
            items,
            order,
            coupon_code,
            gift_cert_code,
            reward_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_commerce::basket::{BasketLine, ProductRef};
    use portico_commerce::ids::{LineId, ProductId};
    use portico_commerce::money::{Currency, Money, TaxedPrice};
    use portico_engine::{EngineConfig, EngineSession, InMemoryEngine};

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
    }

    fn store() -> StoreConfig {
        StoreConfig::new("store1", CustomerId::new(900)).with_tax_inclusive_display(true)
    }

    fn session(engine: InMemoryEngine) -> EngineSession {
        EngineSession::new(store().store_id, Box::new(engine), EngineConfig::default())
    }

    #[test]
    fn guest_cart_with_saved_coupon() {
        let engine = InMemoryEngine::new()
            .with_basket_line(line())
            .with_stock(ProductId::new(10), 5);
        let mut session = session(engine);
        session.orders_mut().set_coupon_code("SAVE10");

        let view = CartScreen::new().render(&mut session, &store(), CustomerId::NONE);

        let order = view.order.expect("preview order");
        assert_eq!(order.customer_id, CustomerId::new(900));
        assert_eq!(order.coupon_code.as_deref(), Some("SAVE10"));
        assert_eq!(view.coupon_code.as_deref(), Some("SAVE10"));

        // Tax-inclusive display: the 11.00 price variant reaches the screen.
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].total_price, "$11.00");
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].quantity_in_stock, 5);
    }

    #[test]
    fn empty_basket_renders_empty_view() {
        let mut session = session(InMemoryEngine::new());
        let view = CartScreen::new().render(&mut session, &store(), CustomerId::NONE);
        assert!(view.items.is_empty());
        assert!(view.order.is_none());
    }

    #[test]
    fn totals_failure_still_renders_items() {
        let engine = InMemoryEngine::new()
            .with_basket_line(line())
            .declining_orders();
        let mut session = session(engine);

        let view = CartScreen::new().render(&mut session, &store(), CustomerId::NONE);

        assert_eq!(view.items.len(), 1);
        assert!(view.order.is_none());
    }

    #[test]
    fn engine_failure_renders_empty_cart() {
        let mut session = session(InMemoryEngine::new().failing());
        let view = CartScreen::new().render(&mut session, &store(), CustomerId::NONE);
        assert!(view.items.is_empty());
        assert!(view.order.is_none());
    }

    #[test]
    fn reward_points_surfaced_only_when_nonzero() {
        let engine = InMemoryEngine::new().with_basket_line(line());
        let mut session_a = session(engine);
        let view = CartScreen::new().render(&mut session_a, &store(), CustomerId::NONE);
        assert!(view.reward_points.is_none());

        let engine = InMemoryEngine::new().with_basket_line(line());
        let mut session = session(engine);
        session.orders_mut().set_reward_points(250);
        let view = CartScreen::new().render(&mut session, &store(), CustomerId::NONE);
        assert_eq!(view.reward_points, Some(250));
    }
}
