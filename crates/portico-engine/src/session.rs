//! Per-store engine sessions.

use crate::client::CommerceEngine;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::orders::OrderManager;
use portico_commerce::ids::{CustomerId, StoreId};

/// A live engine client bound to exactly one store.
///
/// Owned by the browser session; at most one exists per
/// (browser session, store id) and exactly one is active per request. The
/// session is reached only through the handle returned by
/// [`EngineSessionCache`](crate::EngineSessionCache) — there is no ambient
/// or global way to the active client.
pub struct EngineSession {
    store_id: StoreId,
    engine: Box<dyn CommerceEngine>,
    orders: OrderManager,
    config: EngineConfig,
}

impl EngineSession {
    /// Bind a client to a store.
    pub fn new(store_id: StoreId, engine: Box<dyn CommerceEngine>, config: EngineConfig) -> Self {
        Self {
            store_id,
            engine,
            orders: OrderManager::new(),
            config,
        }
    }

    /// The store this session is bound to.
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// The configuration the session was created under.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The session's order state.
    pub fn orders(&self) -> &OrderManager {
        &self.orders
    }

    /// Mutable access to the session's order state.
    pub fn orders_mut(&mut self) -> &mut OrderManager {
        &mut self.orders
    }

    /// The underlying engine client.
    pub fn engine_mut(&mut self) -> &mut dyn CommerceEngine {
        self.engine.as_mut()
    }

    /// The customer currently authenticated on the engine session;
    /// [`CustomerId::NONE`] when there is none.
    pub fn customer_id(&self) -> CustomerId {
        self.engine.current_customer_id()
    }

    /// The engine session token, when established.
    pub fn session_token(&self) -> Option<String> {
        self.engine.session_token()
    }

    /// Full credential login.
    pub fn login(&mut self, username: &str, credential: &str) -> Result<bool, EngineError> {
        self.engine.login(username, credential)
    }

    /// Privileged re-login by customer id, skipping the password check.
    pub fn login_by_id(&mut self, customer_id: CustomerId) -> Result<bool, EngineError> {
        self.engine.login_by_id(customer_id)
    }

    /// Log the engine session out.
    pub fn logout(&mut self) -> Result<(), EngineError> {
        self.engine.logout()
    }
}

impl std::fmt::Debug for EngineSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSession")
            .field("store_id", &self.store_id)
            .field("customer_id", &self.customer_id())
            .finish_non_exhaustive()
    }
}
