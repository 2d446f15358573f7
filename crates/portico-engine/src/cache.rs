//! Per-browser-session engine session cache.

use crate::client::EngineSessionFactory;
use crate::error::EngineError;
use crate::session::EngineSession;
use portico_commerce::ids::StoreId;
use portico_commerce::store::StoreConfig;
use std::sync::{Arc, Mutex};

/// Default cap on cached per-store sessions.
pub const DEFAULT_STORE_CAPACITY: usize = 8;

/// The engine session resolved for a request.
#[derive(Clone)]
pub struct SessionHandle {
    /// The active session for this request. Shared with later requests from
    /// the same browser session; lock it for the duration of the request's
    /// engine work.
    pub session: Arc<Mutex<EngineSession>>,
    /// Whether the store was switched this request: an active session
    /// existed and was bound to a different store.
    pub switched: bool,
}

struct CachedEntry {
    store_id: StoreId,
    session: Arc<Mutex<EngineSession>>,
}

struct CacheInner {
    /// Store id of the session attached to the current request.
    active: Option<StoreId>,
    /// Cached sessions, least recently used first.
    entries: Vec<CachedEntry>,
    /// The most recently resolved store configuration.
    store_config: Option<StoreConfig>,
}

/// Maps one browser session to one engine session per store id.
///
/// Switching stores does not destroy the previous store's session; both
/// stay cached for fast switch-back, bounded by an LRU cap. All reads and
/// writes of the active-session pointer go through one interior mutex, so
/// concurrent requests from the same browser session (double-submit,
/// prefetch) cannot race the switch logic.
pub struct EngineSessionCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl EngineSessionCache {
    /// Create a cache with the default per-store capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// Create a cache keeping at most `capacity` per-store sessions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                active: None,
                entries: Vec::new(),
                store_config: None,
            }),
            capacity: capacity.max(1),
        }
    }

    /// Resolve the engine session for the store in `config`, creating or
    /// switching as needed.
    ///
    /// The freshly resolved `StoreConfig` is re-stored on every call, even
    /// when the session is reused: display preferences can change while the
    /// store id stays the same.
    pub fn get_or_create(
        &self,
        config: &StoreConfig,
        factory: &dyn EngineSessionFactory,
    ) -> Result<SessionHandle, EngineError> {
        let mut inner = self.inner.lock().unwrap();

        let switched = inner
            .active
            .as_ref()
            .is_some_and(|active| active != &config.store_id);

        inner.store_config = Some(config.clone());

        if let Some(pos) = inner
            .entries
            .iter()
            .position(|e| e.store_id == config.store_id)
        {
            // Reuse: move to most-recently-used position.
            let entry = inner.entries.remove(pos);
            let session = entry.session.clone();
            inner.entries.push(entry);
            inner.active = Some(config.store_id.clone());
            if switched {
                tracing::debug!(store = %config.store_id, "switched back to cached engine session");
            }
            return Ok(SessionHandle { session, switched });
        }

        // First visit to this store in this browser session.
        let session = Arc::new(Mutex::new(factory.create(config)?));
        inner.entries.push(CachedEntry {
            store_id: config.store_id.clone(),
            session: session.clone(),
        });
        inner.active = Some(config.store_id.clone());
        tracing::debug!(store = %config.store_id, switched, "created engine session");

        while inner.entries.len() > self.capacity {
            // Evict the least recently used session that is not active.
            let Some(pos) = inner
                .entries
                .iter()
                .position(|e| Some(&e.store_id) != inner.active.as_ref())
            else {
                break;
            };
            let evicted = inner.entries.remove(pos);
            tracing::debug!(store = %evicted.store_id, "evicted cached engine session");
        }

        Ok(SessionHandle { session, switched })
    }

    /// The most recently resolved store configuration.
    pub fn store_config(&self) -> Option<StoreConfig> {
        self.inner.lock().unwrap().store_config.clone()
    }

    /// The store id of the currently active session.
    pub fn active_store_id(&self) -> Option<StoreId> {
        self.inner.lock().unwrap().active.clone()
    }

    /// Number of cached per-store sessions.
    pub fn cached_stores(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }
}

impl Default for EngineSessionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::memory::InMemoryEngine;
    use portico_commerce::ids::CustomerId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFactory {
        created: AtomicUsize,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                created: AtomicUsize::new(0),
            }
        }

        fn count(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }
    }

    impl EngineSessionFactory for CountingFactory {
        fn create(&self, config: &StoreConfig) -> Result<EngineSession, EngineError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(EngineSession::new(
                config.store_id.clone(),
                Box::new(InMemoryEngine::new()),
                EngineConfig::default(),
            ))
        }
    }

    fn store(id: &str) -> StoreConfig {
        StoreConfig::new(id, CustomerId::new(0))
    }

    #[test]
    fn same_store_reuses_identical_session() {
        let cache = EngineSessionCache::new();
        let factory = CountingFactory::new();

        let a = cache.get_or_create(&store("s1"), &factory).unwrap();
        let b = cache.get_or_create(&store("s1"), &factory).unwrap();

        assert!(Arc::ptr_eq(&a.session, &b.session));
        assert!(!a.switched);
        assert!(!b.switched);
        assert_eq!(factory.count(), 1);
    }

    #[test]
    fn store_switch_creates_and_keeps_previous() {
        let cache = EngineSessionCache::new();
        let factory = CountingFactory::new();

        let a = cache.get_or_create(&store("a"), &factory).unwrap();
        let b = cache.get_or_create(&store("b"), &factory).unwrap();
        assert!(b.switched);
        assert!(!Arc::ptr_eq(&a.session, &b.session));

        // Switch back to A: the original session comes out of the cache.
        let a2 = cache.get_or_create(&store("a"), &factory).unwrap();
        assert!(a2.switched);
        assert!(Arc::ptr_eq(&a.session, &a2.session));
        assert_eq!(factory.count(), 2);
    }

    #[test]
    fn store_config_restored_on_reuse() {
        let cache = EngineSessionCache::new();
        let factory = CountingFactory::new();

        cache.get_or_create(&store("s1"), &factory).unwrap();
        assert!(!cache.store_config().unwrap().display_price_with_tax);

        // Same store id, changed display preference.
        let updated = store("s1").with_tax_inclusive_display(true);
        cache.get_or_create(&updated, &factory).unwrap();
        assert!(cache.store_config().unwrap().display_price_with_tax);
        assert_eq!(factory.count(), 1);
    }

    #[test]
    fn lru_bound_evicts_oldest_inactive() {
        let cache = EngineSessionCache::with_capacity(2);
        let factory = CountingFactory::new();

        cache.get_or_create(&store("a"), &factory).unwrap();
        cache.get_or_create(&store("b"), &factory).unwrap();
        cache.get_or_create(&store("c"), &factory).unwrap();
        assert_eq!(cache.cached_stores(), 2);

        // "a" was evicted; revisiting it constructs a fresh session.
        cache.get_or_create(&store("a"), &factory).unwrap();
        assert_eq!(factory.count(), 4);
    }

    #[test]
    fn active_session_never_evicted() {
        let cache = EngineSessionCache::with_capacity(1);
        let factory = CountingFactory::new();

        let a = cache.get_or_create(&store("a"), &factory).unwrap();
        let a2 = cache.get_or_create(&store("a"), &factory).unwrap();
        assert!(Arc::ptr_eq(&a.session, &a2.session));
        assert_eq!(cache.active_store_id(), Some(StoreId::new("a")));
        assert_eq!(factory.count(), 1);
    }
}
