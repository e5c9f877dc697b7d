//! Ledger seam.
//!
//! The orchestrator commits through this trait; `shp-ledger` provides the
//! durable implementation, tests provide stubs.  Keeping the trait here
//! (and the implementation in a sibling crate) means checkout logic can be
//! exercised without touching a filesystem.

use shp_schemas::{IdentityKey, LineItem, OrderRecord, Rupees};

/// An order as the orchestrator hands it over: everything except the
/// fields the ledger itself assigns (id, timestamp, status).
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<LineItem>,
    pub total: Rupees,
    pub payment_id: String,
    pub order_id: String,
}

/// A ledger append failed.  The orchestrator treats this as fatal for the
/// attempt and leaves the cart untouched.
#[derive(Debug, Clone)]
pub struct LedgerError {
    pub reason: String,
}

impl LedgerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LEDGER_APPEND: {}", self.reason)
    }
}

impl std::error::Error for LedgerError {}

/// Durable, per-identity order store.
///
/// # Contract
/// `append` is atomic from the caller's perspective: either the record is
/// durably stored (and returned with id/timestamp/status assigned) or the
/// store is unchanged.  Records are immutable once appended; there are no
/// update or delete operations.
pub trait LedgerStore {
    fn append(&self, identity: &IdentityKey, draft: OrderDraft)
        -> Result<OrderRecord, LedgerError>;
}
