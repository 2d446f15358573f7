//! Basket projection for the cart screen.

use portico_commerce::basket::{BasketLine, OptionKind, SelectedOption};
use portico_commerce::ids::{LineId, ProductId};
use portico_commerce::store::StoreConfig;
use portico_engine::{EngineError, EngineSession};
use serde::Serialize;

/// A display-ready cart item record.
///
/// Lines whose product no longer resolves are skipped, so this sequence
/// does not line up positionally with the basket — consumers must re-key by
/// `line_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItemView {
    /// Basket line id; the stable key for downstream code.
    pub line_id: LineId,
    /// Product id.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Product image path.
    pub image: String,
    /// Quantity in the basket.
    pub quantity: i64,
    /// Quantity in stock at refresh time.
    pub quantity_in_stock: i64,
    /// Formatted line total, per the store's tax display preference.
    pub total_price: String,
    /// Formatted option values, positionally aligned with the line's
    /// option slots; empty slots render as empty strings.
    pub options: Vec<String>,
}

/// Projects refreshed basket lines into [`CartItemView`] records.
///
/// Projection is pure: re-running it over the same lines yields the same
/// views and touches nothing.
#[derive(Debug, Default)]
pub struct BasketProjector;

impl BasketProjector {
    /// Create a projector.
    pub fn new() -> Self {
        Self
    }

    /// Re-read stock quantities and prices for the lines from the engine.
    pub fn refresh(
        &self,
        session: &mut EngineSession,
        lines: &[BasketLine],
    ) -> Result<Vec<BasketLine>, EngineError> {
        session.engine_mut().refresh_basket_stock(lines)
    }

    /// Map lines into display records, skipping lines with no product.
    pub fn project(&self, lines: &[BasketLine], store: &StoreConfig) -> Vec<CartItemView> {
        lines
            .iter()
            .filter_map(|line| self.project_line(line, store))
            .collect()
    }

    fn project_line(&self, line: &BasketLine, store: &StoreConfig) -> Option<CartItemView> {
        let product = line.product.as_ref()?;
        let total = line.price.for_display(store.display_price_with_tax);
        Some(CartItemView {
            line_id: line.id,
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            quantity: line.quantity,
            quantity_in_stock: line.quantity_in_stock,
            total_price: total.display(),
            options: line.options.iter().map(|slot| format_option(slot)).collect(),
        })
    }
}

/// Format one option slot.
///
/// Empty slots keep their position as empty strings so the output stays
/// aligned with the engine-side option identifiers.
fn format_option(slot: &Option<SelectedOption>) -> String {
    match slot {
        None => String::new(),
        Some(option) => match option.kind {
            OptionKind::VariableQuantity => {
                format!("{} {} {}", option.name, option.quantity, option.value)
            }
            OptionKind::Fixed => format!("{} {}", option.name, option.value),
        },
    }
}
