//! shp-gateway
//!
//! Order Service: opens a monetary transaction with the external payment
//! gateway and returns the gateway-issued order handle.
//!
//! # Contract
//! - [`PaymentGateway`] is the single seam between checkout and the outside
//!   world.  The live adapter ([`RazorpayGateway`]) and the test double in
//!   `shp-testkit` both implement it; orchestration code never names a
//!   concrete adapter.
//! - [`amount_to_paise`] is the **canonical** conversion point: every
//!   adapter (live or mock) must use it, so the minor-unit amount on the
//!   wire is always exactly `major × 100`.  No floating arithmetic anywhere.
//! - `create_order` mutates nothing locally: no cart, no ledger.  It is
//!   purely a handshake.  Retries are the caller's decision and must use a
//!   fresh amount snapshot, never a replay of the same request.

use async_trait::async_trait;
use shp_schemas::{GatewayOrder, Paise, Rupees};

mod error;
mod razorpay;
mod receipt;

pub use error::GatewayError;
pub use razorpay::{RazorpayGateway, RAZORPAY_ORDERS_URL};
pub use receipt::new_receipt;

// ---------------------------------------------------------------------------
// PaymentGateway trait
// ---------------------------------------------------------------------------

/// Port to the external payment gateway.
///
/// Implementations must be side-effect free with respect to local state:
/// the only observable effect of `create_order` is the remote transaction
/// it opens.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a transaction for `amount` major units.  Returns the
    /// gateway-issued order, or the first error encountered.  Never retries
    /// internally.
    async fn create_order(&self, amount: Rupees) -> Result<GatewayOrder, GatewayError>;
}

// ---------------------------------------------------------------------------
// Amount conversion
// ---------------------------------------------------------------------------

/// Validate and convert a major-unit amount for the gateway wire.
///
/// Exact `× 100`; rejects non-positive amounts and i64 overflow.  Fractional
/// majors cannot reach this function; `Rupees` is integral by construction.
pub fn amount_to_paise(amount: Rupees) -> Result<Paise, GatewayError> {
    if !amount.is_positive() {
        return Err(GatewayError::InvalidAmount(amount.raw()));
    }
    amount
        .to_paise()
        .ok_or(GatewayError::InvalidAmount(amount.raw()))
}
