//! Commerce domain types for the Portico storefront pipeline.
//!
//! This crate holds the data model shared by the engine layer and the
//! request pipeline:
//!
//! - **Money**: cents-based amounts, plus tax-inclusive/exclusive price pairs
//! - **Ids**: newtype identifiers for stores, customers, products, lines
//! - **Basket**: basket lines, selected options, mutation helpers
//! - **Orders**: ephemeral preview orders, totals, shipping quotes
//! - **Store**: the per-request store configuration snapshot
//!
//! Everything here is plain data; all I/O lives behind the engine traits in
//! `portico-engine`.

pub mod basket;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod store;

pub use error::CommerceError;
pub use ids::{CustomerId, GroupId, LineId, ProductId, StoreId};
pub use money::{Currency, Money, TaxedPrice};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::basket::{Basket, BasketLine, OptionKind, ProductRef, SelectedOption};
    pub use crate::error::CommerceError;
    pub use crate::ids::{CustomerId, GroupId, LineId, ProductId, StoreId};
    pub use crate::money::{Currency, Money, TaxedPrice};
    pub use crate::order::{EphemeralOrder, OrderTotals, ShippingQuote};
    pub use crate::store::StoreConfig;
}
