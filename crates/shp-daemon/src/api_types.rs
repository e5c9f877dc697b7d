//! Request and response types for all shp-daemon HTTP endpoints.
//!
//! These types are `Serialize + Deserialize` so they can be JSON-encoded
//! by Axum and decoded by tests.  No business logic lives here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /v1/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Uniform failure body for both checkout endpoints.  Nothing escapes a
/// handler as an unhandled fault; every error kind lands here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    pub error: String,
}

// ---------------------------------------------------------------------------
// POST /v1/checkout/create-order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Major currency units.  Must be a positive integer; fractional
    /// amounts fail deserialization.
    pub amount: i64,
}

/// The gateway order as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBody {
    pub id: String,
    /// Minor units (paise).
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// Always `true`.
    pub success: bool,
    pub order: OrderBody,
    /// Public key id the client hands to the gateway's collection UI.
    pub key_id: String,
}

// ---------------------------------------------------------------------------
// POST /v1/checkout/verify-payment
// ---------------------------------------------------------------------------

/// Field names match the gateway contract verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    /// Always `true`.
    pub success: bool,
    pub message: String,
    pub payment_id: String,
    pub order_id: String,
}
