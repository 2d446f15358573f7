//! The per-request composition root.

use crate::admin::AdminCustomerLookup;
use crate::cart::{CartScreen, CartView};
use crate::context::RequestContext;
use crate::error::StorefrontError;
use crate::host::{RedirectSink, SecurityContext};
use crate::identity::HostIdentityAssertion;
use crate::reconcile::{AuthOutcome, SessionAuthReconciler};
use crate::redirect::LogoutRedirector;
use crate::resolve::StoreConfigResolver;
use portico_commerce::ids::CustomerId;
use portico_commerce::store::StoreConfig;
use portico_engine::cache::EngineSessionCache;
use portico_engine::client::EngineSessionFactory;
use portico_engine::session::EngineSession;
use std::sync::{Arc, Mutex};

/// What one request's reconciliation produced.
pub struct RequestOutcome {
    /// The store configuration resolved for this request.
    pub store: StoreConfig,
    /// The active engine session for this request.
    pub session: Arc<Mutex<EngineSession>>,
    /// The reconciliation's terminal state.
    pub auth: AuthOutcome,
    /// Whether the logout redirect was actually dispatched.
    pub redirected: bool,
}

impl RequestOutcome {
    /// Whether the rest of the request pipeline should run.
    ///
    /// False after a `LoggedOutRedirect`, whether or not the dispatch
    /// itself succeeded.
    pub fn should_continue(&self) -> bool {
        self.auth.should_continue()
    }

    /// The reconciled customer id; [`CustomerId::NONE`] unless
    /// authenticated.
    pub fn customer_id(&self) -> CustomerId {
        match self.auth {
            AuthOutcome::Authenticated(id) => id,
            _ => CustomerId::NONE,
        }
    }
}

/// Wires one request through store resolution, engine session caching,
/// identity reconciliation and the logout redirect.
pub struct StorefrontPipeline {
    resolver: Box<dyn StoreConfigResolver>,
    factory: Box<dyn EngineSessionFactory>,
    admin: Box<dyn AdminCustomerLookup>,
    redirector: LogoutRedirector,
    cart: CartScreen,
}

impl StorefrontPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        resolver: Box<dyn StoreConfigResolver>,
        factory: Box<dyn EngineSessionFactory>,
        admin: Box<dyn AdminCustomerLookup>,
    ) -> Self {
        Self {
            resolver,
            factory,
            admin,
            redirector: LogoutRedirector::new(),
            cart: CartScreen::new(),
        }
    }

    /// Run reconciliation for one request.
    ///
    /// `cache` is the browser session's engine session cache. Errors cover
    /// request setup only; reconciliation itself always produces an
    /// [`AuthOutcome`].
    pub fn handle(
        &self,
        ctx: &RequestContext,
        cache: &EngineSessionCache,
        assertion: Option<&HostIdentityAssertion>,
        security: &mut dyn SecurityContext,
        redirect: &mut dyn RedirectSink,
    ) -> Result<RequestOutcome, StorefrontError> {
        let store = self.resolver.resolve(ctx)?;
        let handle = cache.get_or_create(&store, self.factory.as_ref())?;

        let auth = {
            let mut session = handle.session.lock().unwrap();
            SessionAuthReconciler::new(self.admin.as_ref()).reconcile(
                &mut session,
                &store,
                handle.switched,
                assertion,
                security,
            )
        };

        let redirected = if auth.should_continue() {
            false
        } else {
            self.redirector.dispatch(ctx, redirect)
        };

        Ok(RequestOutcome {
            store,
            session: handle.session,
            auth,
            redirected,
        })
    }

    /// Render the cart for a reconciled request.
    ///
    /// Returns an empty view when reconciliation ended in a redirect; the
    /// request was short-circuited and must not touch the engine again.
    pub fn cart_view(&self, outcome: &RequestOutcome) -> CartView {
        if !outcome.should_continue() {
            return CartView::default();
        }
        let mut session = outcome.session.lock().unwrap();
        self.cart
            .render(&mut session, &outcome.store, outcome.customer_id())
    }
}
