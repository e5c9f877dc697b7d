//! Live Razorpay adapter.
//!
//! Speaks the Razorpay Orders REST API: `POST /v1/orders` with Basic auth
//! (key id / key secret) and a JSON body of `{amount, currency, receipt}`
//! where `amount` is in paise.  Credentials are supplied at construction,
//! never embedded in request bodies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shp_config::ResolvedSecrets;
use shp_schemas::{GatewayOrder, Paise, Rupees, CURRENCY};
use tracing::warn;

use crate::{amount_to_paise, new_receipt, GatewayError, PaymentGateway};

/// Production order-creation endpoint.
pub const RAZORPAY_ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    /// Minor units (paise).
    amount: i64,
    currency: &'static str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OrderWire {
    id: String,
    amount: i64,
    currency: String,
    receipt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    error: Option<ErrorBodyWire>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyWire {
    description: Option<String>,
}

// ---------------------------------------------------------------------------
// RazorpayGateway
// ---------------------------------------------------------------------------

/// Live HTTP adapter for the Razorpay gateway.
///
/// Credentials are redacted from `Debug` output.
pub struct RazorpayGateway {
    client: reqwest::Client,
    key_id: String,
    key_secret: String,
    orders_url: String,
}

impl std::fmt::Debug for RazorpayGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayGateway")
            .field("key_id", &"<REDACTED>")
            .field("key_secret", &"<REDACTED>")
            .field("orders_url", &self.orders_url)
            .finish()
    }
}

impl RazorpayGateway {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            orders_url: RAZORPAY_ORDERS_URL.to_string(),
        }
    }

    /// Construct from resolved secrets; fails closed when either credential
    /// is missing, before any network activity can occur.
    pub fn from_secrets(secrets: &ResolvedSecrets) -> Result<Self, GatewayError> {
        let (key_id, key_secret) = secrets
            .require()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self::new(key_id, key_secret))
    }

    /// Override the orders endpoint (local stub servers in tests).
    pub fn with_orders_url(mut self, url: impl Into<String>) -> Self {
        self.orders_url = url.into();
        self
    }

    /// The public key id, as returned to clients alongside a created order.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, amount: Rupees) -> Result<GatewayOrder, GatewayError> {
        let paise = amount_to_paise(amount)?;
        let receipt = new_receipt();
        let body = CreateOrderBody {
            amount: paise.raw(),
            currency: CURRENCY,
            receipt: &receipt,
        };

        let resp = self
            .client
            .post(&self.orders_url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let reason = resp
                .json::<ErrorWire>()
                .await
                .ok()
                .and_then(|w| w.error)
                .and_then(|e| e.description)
                .unwrap_or_else(|| "Failed to create order".to_string());
            warn!(status = status.as_u16(), %reason, "gateway rejected order creation");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let wire: OrderWire = resp
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("decode order response: {e}")))?;

        Ok(GatewayOrder {
            order_id: wire.id,
            amount: Paise::new(wire.amount),
            currency: wire.currency,
            receipt: wire.receipt.unwrap_or(receipt),
        })
    }
}
