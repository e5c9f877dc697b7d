//! In-memory cart aggregator.
//!
//! Design decisions (kept intentionally simple/deterministic):
//! - Line items live in a `Vec` in insertion order: totals don't care, but
//!   display does, and carts are small enough that linear lookup wins over
//!   map bookkeeping.
//! - No two lines share a `product_id`; adding an existing product bumps
//!   its quantity instead.
//! - A quantity driven to zero or below removes the line entirely.  No
//!   zero-quantity line is ever retained.
//! - Every mutation is synchronous and immediately observable.  No I/O.
//!
//! [`Cart::snapshot`] produces the immutable copy the checkout orchestrator
//! commits; the live cart may keep mutating underneath an in-flight payment
//! without affecting what gets recorded.

use serde::{Deserialize, Serialize};
use shp_schemas::{LineItem, Product, Rupees};

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// The mutable set of (product, quantity) line items for the active session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.  If the product is already present its
    /// quantity is incremented; otherwise a new line is inserted with
    /// quantity 1.  Always succeeds.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(LineItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        });
    }

    /// Add `delta` to a line's quantity.  A resulting quantity ≤ 0 removes
    /// the line entirely.  Silently a no-op when `product_id` is absent.
    pub fn change_quantity(&mut self, product_id: u64, delta: i64) {
        let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) else {
            return;
        };
        let next = i64::from(self.items[pos].quantity).saturating_add(delta);
        if next <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = next.min(i64::from(u32::MAX)) as u32;
        }
    }

    /// Unconditional removal; no-op when absent.
    pub fn remove_item(&mut self, product_id: u64) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Σ unit_price × quantity over all lines.  Pure fold; saturates at
    /// `i64::MAX` rather than wrapping on pathological inputs.
    pub fn total(&self) -> Rupees {
        self.items.iter().fold(Rupees::ZERO, |acc, i| {
            acc.saturating_add(i.unit_price.saturating_mul_qty(i.quantity))
        })
    }

    /// Σ quantity over all lines (badge display).
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Empty the cart.  Called only after a committed order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Immutable copy of the current lines and total, taken as one unit.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
        }
    }
}

// ---------------------------------------------------------------------------
// CartSnapshot
// ---------------------------------------------------------------------------

/// Point-in-time copy of a cart.  The checkout orchestrator captures one on
/// order creation and commits it (not the live cart), so intervening
/// mutations cannot diverge the amount charged from the items recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub total: Rupees,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
