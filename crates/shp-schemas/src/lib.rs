use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod money;

pub use money::{Paise, Rupees, PAISE_PER_RUPEE};

/// The only currency this system transacts in.
pub const CURRENCY: &str = "INR";

/// Catalog entry consumed by the cart. Rendering lives outside this core;
/// the cart only needs identity, display name and unit price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: Rupees,
}

/// One (product, quantity) line in a cart or a committed order.
/// Invariant: `quantity > 0`; a line reaching zero is removed, never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: u64,
    pub name: String,
    pub unit_price: Rupees,
    pub quantity: u32,
}

impl LineItem {
    /// `unit_price × quantity`, `None` on i64 overflow.
    pub fn line_total(&self) -> Option<Rupees> {
        self.unit_price.checked_mul_qty(self.quantity)
    }
}

/// Order opened at the payment gateway. The gateway owns it; locally only
/// `order_id` is retained past checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: String,
    /// Minor units (paise), exactly `major × 100`.
    pub amount: Paise,
    pub currency: String,
    /// Idempotency reference echoed back by the gateway.
    pub receipt: String,
}

/// Completion assertion produced by the gateway's client-side collection
/// flow. Consumed exactly once by the verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAssertion {
    pub order_id: String,
    pub payment_id: String,
    /// Hex HMAC-SHA256 over `order_id + "|" + payment_id`.
    pub signature: String,
}

/// Status of a ledger record. Only `Confirmed` is ever produced: records
/// exist only for verified payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Confirmed,
}

/// Immutable record of a committed order, owned by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Monotonically increasing, unique per identity. Assigned by the ledger.
    pub id: u64,
    pub items: Vec<LineItem>,
    pub total: Rupees,
    pub payment_id: String,
    pub order_id: String,
    pub ts_utc: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Opaque handle for an authenticated user, supplied by the external
/// identity provider. Used only to scope ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(raw: impl Into<String>) -> Self {
        IdentityKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
