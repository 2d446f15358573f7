//! Session/identity reconciliation.
//!
//! Runs once per request, before anything touches the cart path, and aligns
//! the engine's authenticated customer with whatever the host framework
//! asserts about the visitor. Authentication itself is two-phase: the host's
//! login module already verified credentials and resolved a customer id;
//! this state machine only replays that identity into the engine session.

use crate::admin::AdminCustomerLookup;
use crate::host::SecurityContext;
use crate::identity::HostIdentityAssertion;
use portico_commerce::ids::CustomerId;
use portico_commerce::store::StoreConfig;
use portico_engine::EngineSession;

/// Terminal state of one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The engine session is authenticated for this customer.
    Authenticated(CustomerId),
    /// No authenticated customer; the visitor browses as a guest.
    Unauthenticated,
    /// Identity could not be replayed; the visitor must be sent to the
    /// logout path and the rest of the request short-circuited.
    LoggedOutRedirect,
}

impl AuthOutcome {
    /// Whether the request should continue past reconciliation.
    pub fn should_continue(&self) -> bool {
        !matches!(self, AuthOutcome::LoggedOutRedirect)
    }
}

/// The per-request reconciliation state machine.
pub struct SessionAuthReconciler<'a> {
    admin: &'a dyn AdminCustomerLookup,
}

impl<'a> SessionAuthReconciler<'a> {
    /// Create a reconciler over the admin lookup used by the store-switch
    /// group gate.
    pub fn new(admin: &'a dyn AdminCustomerLookup) -> Self {
        Self { admin }
    }

    /// Align the engine session with the host's identity assertion.
    ///
    /// `switched` is true when the store changed this request (the active
    /// engine session was bound to a different store id).
    pub fn reconcile(
        &self,
        session: &mut EngineSession,
        store: &StoreConfig,
        switched: bool,
        assertion: Option<&HostIdentityAssertion>,
        security: &mut dyn SecurityContext,
    ) -> AuthOutcome {
        let engine_customer = session.customer_id();

        let Some(assertion) = assertion else {
            // The visitor has no host-level identity; the engine must not
            // retain a stale one.
            if let Err(err) = session.logout() {
                tracing::warn!(store = %store.store_id, error = %err, "engine logout failed");
            }
            return AuthOutcome::Unauthenticated;
        };

        if assertion.remember_me {
            return self.reconcile_remembered(session, store, assertion, engine_customer);
        }

        let auto_login = if engine_customer == CustomerId::NONE && switched {
            self.group_gate(assertion.customer_id, store)
        } else {
            true
        };

        if !auto_login {
            // The customer's group is not accepted by the new store; force
            // re-authentication on a later request, without redirecting.
            security.clear();
            tracing::debug!(
                store = %store.store_id,
                customer = %assertion.customer_id,
                "security context cleared after store-switch group check"
            );
            return AuthOutcome::Unauthenticated;
        }

        match session.login(&assertion.principal, assertion.credential.expose()) {
            Ok(true) => AuthOutcome::Authenticated(session.customer_id()),
            Ok(false) => {
                tracing::warn!(
                    store = %store.store_id,
                    principal = %assertion.principal,
                    "engine rejected login for host-verified principal"
                );
                AuthOutcome::LoggedOutRedirect
            }
            Err(err) => {
                tracing::warn!(store = %store.store_id, error = %err, "engine login failed");
                AuthOutcome::LoggedOutRedirect
            }
        }
    }

    /// Remember-me reconciliation: the host verified identity through a
    /// long-lived token, so the engine login skips the password check.
    fn reconcile_remembered(
        &self,
        session: &mut EngineSession,
        store: &StoreConfig,
        assertion: &HostIdentityAssertion,
        engine_customer: CustomerId,
    ) -> AuthOutcome {
        if assertion.customer_id == engine_customer {
            return match session.login_by_id(assertion.customer_id) {
                Ok(true) => AuthOutcome::Authenticated(assertion.customer_id),
                Ok(false) => {
                    tracing::warn!(
                        store = %store.store_id,
                        customer = %assertion.customer_id,
                        "engine rejected privileged re-login"
                    );
                    AuthOutcome::LoggedOutRedirect
                }
                Err(err) => {
                    tracing::warn!(store = %store.store_id, error = %err, "privileged re-login failed");
                    AuthOutcome::LoggedOutRedirect
                }
            };
        }

        // Asserted and engine customers disagree under remember-me; neither
        // login nor logout is performed and the engine session keeps
        // whatever identity it had. See DESIGN.md.
        tracing::debug!(
            store = %store.store_id,
            asserted = %assertion.customer_id,
            engine = %engine_customer,
            "remember-me assertion does not match engine customer; leaving session untouched"
        );
        if engine_customer.is_registered() {
            AuthOutcome::Authenticated(engine_customer)
        } else {
            AuthOutcome::Unauthenticated
        }
    }

    /// Whether a remembered identity may auto-login after a store switch.
    ///
    /// Fails closed: a missing record, a non-assignable group, or a lookup
    /// error all deny the login.
    fn group_gate(&self, customer_id: CustomerId, store: &StoreConfig) -> bool {
        match self.admin.customer_for_id(customer_id) {
            Ok(Some(record)) => {
                record.group_id.is_assignable() && store.accepts_group(record.group_id)
            }
            Ok(None) => false,
            Err(err) => {
                tracing::error!(
                    customer = %customer_id,
                    error = %err,
                    "failed to retrieve admin customer for group check"
                );
                false
            }
        }
    }
}
