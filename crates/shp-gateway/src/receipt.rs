//! Receipt (idempotency token) generation.

use uuid::Uuid;

/// A fresh request-scoped receipt reference for the gateway.
///
/// Random v4 token rather than wall-clock derived: clock-based receipts
/// collide under rapid repeated checkout attempts.
pub fn new_receipt() -> String {
    format!("receipt_{}", Uuid::new_v4().simple())
}
