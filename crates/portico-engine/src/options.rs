//! Pricing-context options for engine calls.

use serde::{Deserialize, Serialize};

/// The product-fetch options active on a session.
///
/// These define the pricing context (catalog, price date, external
/// price/stock sources); order creation must run under the same context so
/// cart totals agree with the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductFetchOptions {
    /// Price date as a Unix timestamp, when pricing from a catalog snapshot.
    pub price_date: Option<i64>,
    /// Catalog id to price from.
    pub catalog_id: Option<String>,
    /// Whether prices come from an external source.
    pub use_external_price: bool,
    /// Whether stock quantities come from an external source.
    pub use_external_quantity: bool,
}

/// Options for creating an (ephemeral) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CreateOrderOptions {
    /// Price the order for the store's default customer instead of a
    /// registered one.
    pub use_default_customer: bool,
    /// Price date carried from the session's fetch options.
    pub price_date: Option<i64>,
    /// Catalog id carried from the session's fetch options.
    pub catalog_id: Option<String>,
    /// External-price flag carried from the session's fetch options.
    pub use_external_price: bool,
    /// External-quantity flag carried from the session's fetch options.
    pub use_external_quantity: bool,
}

impl CreateOrderOptions {
    /// Build creation options for a customer under the session's current
    /// fetch options.
    pub fn for_customer(use_default_customer: bool, fetch: &ProductFetchOptions) -> Self {
        Self {
            use_default_customer,
            price_date: fetch.price_date,
            catalog_id: fetch.catalog_id.clone(),
            use_external_price: fetch.use_external_price,
            use_external_quantity: fetch.use_external_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_carry_fetch_context() {
        let fetch = ProductFetchOptions {
            price_date: Some(1700000000),
            catalog_id: Some("spring".into()),
            use_external_price: true,
            use_external_quantity: false,
        };
        let options = CreateOrderOptions::for_customer(true, &fetch);
        assert!(options.use_default_customer);
        assert_eq!(options.price_date, Some(1700000000));
        assert_eq!(options.catalog_id.as_deref(), Some("spring"));
        assert!(options.use_external_price);
        assert!(!options.use_external_quantity);
    }
}
