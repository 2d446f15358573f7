//! Per-request store configuration.

use crate::ids::{CustomerId, GroupId, StoreId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The active store's configuration, resolved once per request.
///
/// This is an immutable snapshot; resolution is cheap and the pipeline never
/// holds one across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store id.
    pub store_id: StoreId,
    /// The default customer used to price guest orders.
    pub guest_customer_id: CustomerId,
    /// Whether prices display tax-inclusive.
    pub display_price_with_tax: bool,
    /// Customer groups accepted by this store.
    pub accepted_groups: HashSet<GroupId>,
}

impl StoreConfig {
    /// Create a configuration for a store.
    pub fn new(store_id: impl Into<StoreId>, guest_customer_id: CustomerId) -> Self {
        Self {
            store_id: store_id.into(),
            guest_customer_id,
            display_price_with_tax: false,
            accepted_groups: HashSet::new(),
        }
    }

    /// Set the tax display preference.
    pub fn with_tax_inclusive_display(mut self, display_with_tax: bool) -> Self {
        self.display_price_with_tax = display_with_tax;
        self
    }

    /// Set the accepted customer groups.
    pub fn with_accepted_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.accepted_groups = groups.into_iter().collect();
        self
    }

    /// Whether a customer group may authenticate into this store.
    pub fn accepts_group(&self, group: GroupId) -> bool {
        self.accepted_groups.contains(&group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_acceptance() {
        let config = StoreConfig::new("store1", CustomerId::new(0))
            .with_accepted_groups([GroupId::new(3), GroupId::new(7)]);
        assert!(config.accepts_group(GroupId::new(7)));
        assert!(!config.accepts_group(GroupId::new(9)));
    }

    #[test]
    fn display_preference_defaults_ex_tax() {
        let config = StoreConfig::new("store1", CustomerId::new(0));
        assert!(!config.display_price_with_tax);
        let config = config.with_tax_inclusive_display(true);
        assert!(config.display_price_with_tax);
    }
}
