//! The commerce-engine capability interface.

use crate::error::EngineError;
use crate::options::CreateOrderOptions;
use crate::session::EngineSession;
use portico_commerce::basket::BasketLine;
use portico_commerce::ids::CustomerId;
use portico_commerce::order::{EphemeralOrder, ShippingQuote};
use portico_commerce::store::StoreConfig;

/// A live client talking to one commerce store.
///
/// Implementations wrap the real engine transport (and enforce the
/// session's [`TimeoutConfig`](crate::TimeoutConfig) on every call) or stand
/// in for it in tests ([`InMemoryEngine`](crate::InMemoryEngine)). The trait
/// is object-safe; the pipeline only ever holds `Box<dyn CommerceEngine>`.
///
/// Calls take `&mut self`: a client carries live connection and
/// authentication state.
pub trait CommerceEngine: Send {
    /// The basket lines of the engine's current customer.
    fn basket_lines(&mut self) -> Result<Vec<BasketLine>, EngineError>;

    /// Re-read stock quantities and prices for the given lines.
    fn refresh_basket_stock(
        &mut self,
        lines: &[BasketLine],
    ) -> Result<Vec<BasketLine>, EngineError>;

    /// Create an order from basket lines without committing a checkout.
    ///
    /// `session_token` is the engine session for registered customers, or
    /// `None` when pricing for the default customer. Returns `Ok(None)` when
    /// the engine declines to create the order; callers degrade, they do not
    /// error.
    fn create_order(
        &mut self,
        session_token: Option<&str>,
        lines: &[BasketLine],
        options: &CreateOrderOptions,
        language_id: i32,
    ) -> Result<Option<EphemeralOrder>, EngineError>;

    /// Request shipping quotes for an order, in engine preference order.
    fn shipping_quotes(
        &mut self,
        order: &EphemeralOrder,
    ) -> Result<Vec<ShippingQuote>, EngineError>;

    /// Recompute an order's totals in place (tax, shipping, discounts,
    /// reward-point value).
    fn recompute_totals(&mut self, order: &mut EphemeralOrder) -> Result<(), EngineError>;

    /// Full credential login. Returns whether the engine accepted.
    fn login(&mut self, username: &str, credential: &str) -> Result<bool, EngineError>;

    /// Privileged re-login for an already-verified customer id, skipping the
    /// password check. Returns whether the engine accepted.
    fn login_by_id(&mut self, customer_id: CustomerId) -> Result<bool, EngineError>;

    /// Log the engine session out.
    fn logout(&mut self) -> Result<(), EngineError>;

    /// The customer currently authenticated on this client's session;
    /// [`CustomerId::NONE`] when there is none.
    fn current_customer_id(&self) -> CustomerId;

    /// The engine session token, when a session is established.
    fn session_token(&self) -> Option<String>;
}

/// Creates engine sessions for stores on first visit.
pub trait EngineSessionFactory: Send + Sync {
    /// Construct a new session bound to the store in `config`.
    fn create(&self, config: &StoreConfig) -> Result<EngineSession, EngineError>;
}
