//! Store configuration resolution.

use crate::context::RequestContext;
use crate::error::StorefrontError;
use portico_commerce::store::StoreConfig;

/// Resolves the active store's configuration for a request.
///
/// Resolution runs on every request and must be cheap; the returned
/// snapshot is immutable for the request's lifetime.
pub trait StoreConfigResolver: Send + Sync {
    /// Resolve the store configuration for a request.
    fn resolve(&self, ctx: &RequestContext) -> Result<StoreConfig, StorefrontError>;
}

/// A resolver that always returns the same store.
///
/// The common single-store deployment; multi-store hosts resolve from the
/// request (host header, mount) instead.
pub struct FixedStoreResolver {
    config: StoreConfig,
}

impl FixedStoreResolver {
    /// Create a resolver for one store.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

impl StoreConfigResolver for FixedStoreResolver {
    fn resolve(&self, _ctx: &RequestContext) -> Result<StoreConfig, StorefrontError> {
        Ok(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_commerce::ids::CustomerId;

    #[test]
    fn fixed_resolver_ignores_request() {
        let resolver = FixedStoreResolver::new(StoreConfig::new("store1", CustomerId::new(0)));
        let ctx = RequestContext::new("/cart");
        let config = resolver.resolve(&ctx).unwrap();
        assert_eq!(config.store_id.as_str(), "store1");
    }
}
