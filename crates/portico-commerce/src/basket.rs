//! Basket lines and selected options.

use crate::ids::{LineId, ProductId};
use crate::money::TaxedPrice;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per basket line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// How a selected option contributes to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OptionKind {
    /// A fixed name/value choice, e.g. "Color: Blue".
    #[default]
    Fixed,
    /// A choice that carries its own quantity, e.g. "Ribbon 3 m".
    VariableQuantity,
}

/// An option value selected on a basket line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name.
    pub name: String,
    /// Selected value.
    pub value: String,
    /// Option kind.
    pub kind: OptionKind,
    /// Quantity for `VariableQuantity` options; ignored otherwise.
    pub quantity: i64,
}

impl SelectedOption {
    /// Create a fixed option.
    pub fn fixed(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: OptionKind::Fixed,
            quantity: 0,
        }
    }

    /// Create a variable-quantity option.
    pub fn variable(name: impl Into<String>, quantity: i64, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: OptionKind::VariableQuantity,
            quantity,
        }
    }
}

/// The product a basket line refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Product id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product image path.
    pub image: String,
}

impl ProductRef {
    /// Create a product reference.
    pub fn new(id: ProductId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
        }
    }
}

/// A line in the customer's basket.
///
/// `options`, when non-empty, has one slot per option the engine reports for
/// this line; empty slots stay `None` so positions keep lining up with the
/// engine-side option identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketLine {
    /// Line id, stable across refreshes.
    pub id: LineId,
    /// The product; `None` when the engine no longer resolves it.
    pub product: Option<ProductRef>,
    /// Quantity in the basket.
    pub quantity: i64,
    /// Quantity in stock, refreshed just before display.
    pub quantity_in_stock: i64,
    /// Final line price, both tax variants.
    pub price: TaxedPrice,
    /// Selected option values, positional.
    pub options: Vec<Option<SelectedOption>>,
}

impl BasketLine {
    /// Create a basket line for a product.
    pub fn new(id: LineId, product: ProductRef, quantity: i64, price: TaxedPrice) -> Self {
        Self {
            id,
            product: Some(product),
            quantity,
            quantity_in_stock: 0,
            price,
            options: Vec::new(),
        }
    }

    /// Set the option slots.
    pub fn with_options(mut self, options: Vec<Option<SelectedOption>>) -> Self {
        self.options = options;
        self
    }

    /// Set the in-stock quantity.
    pub fn with_stock(mut self, quantity_in_stock: i64) -> Self {
        self.quantity_in_stock = quantity_in_stock;
        self
    }
}

/// The customer's basket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Basket lines in engine order.
    pub lines: Vec<BasketLine>,
}

impl Basket {
    /// Create an empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the basket has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count (sum of line quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Get a line by id.
    pub fn line(&self, id: LineId) -> Option<&BasketLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Add a line.
    pub fn push(&mut self, line: BasketLine) {
        self.lines.push(line);
    }

    /// Update a line's quantity. A quantity of zero or less removes the
    /// line. Returns `false` if no line has that id.
    pub fn update_quantity(&mut self, id: LineId, quantity: i64) -> Result<bool, crate::CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_line(id));
        }
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(crate::CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }
        match self.lines.iter_mut().find(|l| l.id == id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line by id. Returns whether a line was removed.
    pub fn remove_line(&mut self, id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() < before
    }
}
