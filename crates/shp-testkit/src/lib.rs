//! Deterministic test doubles for the checkout pipeline.
//!
//! Design rules (same as every other test double in this workspace):
//! - No randomness, no wall-clock.  Order ids derive from a sequence
//!   counter: `order_mock_1`, `order_mock_2`, ...
//! - The mock performs the same amount validation/conversion as the live
//!   adapter (`shp_gateway::amount_to_paise`), so exactness properties hold
//!   against either implementation.
//! - Scripted failure: [`MockGateway::rejecting`] yields an adapter whose
//!   every `create_order` fails with the given error.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use shp_gateway::{amount_to_paise, GatewayError, PaymentGateway};
use shp_schemas::{GatewayOrder, PaymentAssertion, Product, Rupees, CURRENCY};

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

/// In-memory `PaymentGateway` with deterministic order ids.
#[derive(Debug, Default)]
pub struct MockGateway {
    seq: AtomicU64,
    fail_with: Option<GatewayError>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every `create_order` fails with `err`.
    pub fn rejecting(err: GatewayError) -> Self {
        Self {
            seq: AtomicU64::new(0),
            fail_with: Some(err),
        }
    }

    /// Number of orders created so far.
    pub fn orders_created(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(&self, amount: Rupees) -> Result<GatewayOrder, GatewayError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let paise = amount_to_paise(amount)?;
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            order_id: format!("order_mock_{n}"),
            amount: paise,
            currency: CURRENCY.to_string(),
            receipt: format!("receipt_mock_{n}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// A correctly signed completion assertion for the given handles.
pub fn assertion_for(order_id: &str, payment_id: &str, key_secret: &str) -> PaymentAssertion {
    PaymentAssertion {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        signature: shp_verify::sign(order_id, payment_id, key_secret),
    }
}

/// The same assertion with its signature corrupted in one character.
pub fn tampered_assertion_for(
    order_id: &str,
    payment_id: &str,
    key_secret: &str,
) -> PaymentAssertion {
    let mut assertion = assertion_for(order_id, payment_id, key_secret);
    let mut chars: Vec<char> = assertion.signature.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == '0' { '1' } else { '0' };
    assertion.signature = chars.into_iter().collect();
    assertion
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The reference catalog entries used across scenario tests.
pub fn sample_products() -> Vec<Product> {
    [
        (1, "Wireless Headphones", 2999),
        (2, "Smart Watch", 4999),
        (3, "Bluetooth Speaker", 1999),
        (4, "Laptop Stand", 1499),
        (5, "Mechanical Keyboard", 3499),
        (6, "Wireless Mouse", 999),
    ]
    .into_iter()
    .map(|(id, name, price)| Product {
        id,
        name: name.to_string(),
        price: Rupees::new(price),
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
