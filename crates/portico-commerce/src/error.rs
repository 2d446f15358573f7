//! Commerce domain errors.

use thiserror::Error;

/// Errors raised by domain-level operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Basket line not found.
    #[error("basket line not found: {0}")]
    LineNotFound(i64),

    /// Invalid quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line limit.
    #[error("quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch in money arithmetic.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in money arithmetic.
    #[error("arithmetic overflow in money calculation")]
    Overflow,
}
