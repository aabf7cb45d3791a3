use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::Product;

/// One cart line. At most one entry exists per product id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartEntry {
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Sum of line totals. Saturates at `Decimal::MAX` instead of overflowing.
pub(crate) fn total_of(entries: &[CartEntry]) -> Decimal {
    entries
        .iter()
        .map(CartEntry::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Cart lines in insertion order (first-added product first).
///
/// Totals are computed on every read and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == product_id)
    }

    /// Sum of quantities, not the number of lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        total_of(&self.entries)
    }

    /// Increments the existing line for `product` or appends a new one at quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
        } else {
            self.entries.push(CartEntry {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Applies `delta` to a line's quantity when the result stays positive.
    ///
    /// Returns `true` if the quantity changed. A result of zero or less leaves
    /// the line untouched; removal goes through [`Cart::remove`].
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product_id) else {
            return false;
        };

        let new_quantity = i64::from(entry.quantity).saturating_add(delta);
        if new_quantity <= 0 || delta == 0 {
            return false;
        }
        // Quantities past u32::MAX are clamped rather than wrapped.
        entry.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        true
    }

    /// Removes the line for `product_id`. Returns `true` if a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() != before
    }

    /// Empties the cart, returning the lines it held.
    pub fn take(&mut self) -> Vec<CartEntry> {
        std::mem::take(&mut self.entries)
    }
}
