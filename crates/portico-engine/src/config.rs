//! Engine client configuration.

use crate::options::ProductFetchOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts for engine calls.
///
/// Every engine call is a potentially network-bound, blocking call;
/// transports must bound each one and surface
/// [`EngineError::Timeout`](crate::EngineError::Timeout) when exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Time to first byte.
    pub response: Duration,
    /// Total call timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a timeout configuration.
    pub fn new(connect: Duration, response: Duration, total: Duration) -> Self {
        Self {
            connect,
            response,
            total,
        }
    }

    /// Derive a configuration from a single total budget.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            response: total / 2,
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(250),
            response: Duration::from_millis(1000),
            total: Duration::from_millis(3000),
        }
    }
}

/// Configuration an engine session is created under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine language id used for order creation.
    pub language_id: i32,
    /// Timeouts applied to every engine call.
    pub timeouts: TimeoutConfig,
    /// The session's active product-fetch options; order creation is priced
    /// under the same context.
    pub fetch: ProductFetchOptions,
}

impl EngineConfig {
    /// Create a configuration for a language.
    pub fn new(language_id: i32) -> Self {
        Self {
            language_id,
            timeouts: TimeoutConfig::default(),
            fetch: ProductFetchOptions::default(),
        }
    }

    /// Set the call timeouts.
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the product-fetch options.
    pub fn with_fetch_options(mut self, fetch: ProductFetchOptions) -> Self {
        self.fetch = fetch;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_total_splits_budget() {
        let t = TimeoutConfig::from_total(Duration::from_millis(2000));
        assert_eq!(t.connect, Duration::from_millis(500));
        assert_eq!(t.response, Duration::from_millis(1000));
        assert_eq!(t.total, Duration::from_millis(2000));
    }

    #[test]
    fn config_builders() {
        let config = EngineConfig::new(2)
            .with_timeouts(TimeoutConfig::from_total(Duration::from_secs(1)));
        assert_eq!(config.language_id, 2);
        assert_eq!(config.timeouts.total, Duration::from_secs(1));
    }
}
