//! Host identity assertions.

use portico_commerce::ids::CustomerId;
use std::fmt;

/// Opaque credential material carried by an assertion.
///
/// Only ever forwarded to the engine's login call; the `Debug` impl is
/// redacted so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap credential material.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the raw material for the engine login call.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The host framework's per-request claim about who the visitor is.
///
/// Produced by the host's own authentication phase, at most once per
/// request; read-only here. The customer id was already resolved by the
/// host's login module against the engine's customer records.
#[derive(Debug, Clone)]
pub struct HostIdentityAssertion {
    /// Principal (login) name.
    pub principal: String,
    /// Credential material for the engine login.
    pub credential: Credential,
    /// The customer id the host resolved for this principal.
    pub customer_id: CustomerId,
    /// Whether identity came from a long-lived remember-me token rather
    /// than fresh credentials.
    pub remember_me: bool,
}

impl HostIdentityAssertion {
    /// Create an assertion from fresh credentials.
    pub fn new(
        principal: impl Into<String>,
        credential: impl Into<Credential>,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            principal: principal.into(),
            credential: credential.into(),
            customer_id,
            remember_me: false,
        }
    }

    /// Mark the assertion as remember-me authenticated.
    pub fn remembered(mut self) -> Self {
        self.remember_me = true;
        self
    }
}

impl From<String> for Credential {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let assertion =
            HostIdentityAssertion::new("ada", "hunter2", CustomerId::new(42)).remembered();
        let debug = format!("{:?}", assertion);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Credential(***)"));
        assert!(assertion.remember_me);
    }

    #[test]
    fn credential_exposes_for_login() {
        let cred = Credential::new("hunter2");
        assert_eq!(cred.expose(), "hunter2");
    }
}
