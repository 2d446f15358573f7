//! Administrative customer lookup.

use portico_commerce::ids::{CustomerId, GroupId};
use std::collections::HashMap;

/// A customer record as the engine's administrative side sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCustomer {
    /// Customer id.
    pub customer_id: CustomerId,
    /// The customer's group.
    pub group_id: GroupId,
}

impl AdminCustomer {
    /// Create a record.
    pub fn new(customer_id: CustomerId, group_id: GroupId) -> Self {
        Self {
            customer_id,
            group_id,
        }
    }
}

/// Looks up customer records on the engine's administrative interface.
///
/// Used only by the store-switch group gate; failures are opaque host-side
/// errors that the reconciler logs and treats as fail-closed.
pub trait AdminCustomerLookup: Send + Sync {
    /// Fetch the record for a customer id, `None` when unknown.
    fn customer_for_id(&self, id: CustomerId) -> anyhow::Result<Option<AdminCustomer>>;
}

/// An in-memory directory of admin customer records.
#[derive(Debug, Default)]
pub struct InMemoryAdminDirectory {
    records: HashMap<CustomerId, AdminCustomer>,
    failing: bool,
}

impl InMemoryAdminDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer record.
    pub fn with_customer(mut self, customer_id: CustomerId, group_id: GroupId) -> Self {
        self.records
            .insert(customer_id, AdminCustomer::new(customer_id, group_id));
        self
    }

    /// Fail every lookup.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl AdminCustomerLookup for InMemoryAdminDirectory {
    fn customer_for_id(&self, id: CustomerId) -> anyhow::Result<Option<AdminCustomer>> {
        if self.failing {
            anyhow::bail!("admin interface unavailable");
        }
        Ok(self.records.get(&id).cloned())
    }
}
