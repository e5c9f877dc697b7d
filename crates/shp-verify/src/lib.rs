//! Payment signature verification.
//!
//! The gateway attests a completed payment by signing
//! `order_id + "|" + payment_id` with the shared key secret
//! (HMAC-SHA256, hex digest).  [`verify`] recomputes the MAC and compares
//! against the supplied signature in constant time; a mismatch must not
//! leak *where* it mismatches.
//!
//! Pure functions: no I/O, no side effects, deterministic for a given
//! input tuple.  A missing shared secret is a configuration failure owned
//! by the caller (`shp-config`); it never reaches these functions and is
//! never conflated with `Rejected`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Outcome of a signature check.  No partial or ambiguous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    Accepted,
    Rejected,
}

impl VerificationResult {
    pub fn is_accepted(self) -> bool {
        matches!(self, VerificationResult::Accepted)
    }
}

fn mac_over(order_id: &str, payment_id: &str, key_secret: &str) -> HmacSha256 {
    // HMAC-SHA256 accepts keys of any length; new_from_slice cannot fail.
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

/// Hex HMAC-SHA256 signature over `order_id + "|" + payment_id`.
///
/// This is the gateway-side signing primitive; the test kit uses it to
/// fabricate valid completion assertions.
pub fn sign(order_id: &str, payment_id: &str, key_secret: &str) -> String {
    hex::encode(mac_over(order_id, payment_id, key_secret).finalize().into_bytes())
}

/// Check a supplied hex signature against the recomputed MAC.
///
/// Comparison runs through `Mac::verify_slice` (constant-time).  A
/// signature that is not valid hex, or decodes to the wrong length, can
/// never match and is `Rejected` outright.
pub fn verify(
    order_id: &str,
    payment_id: &str,
    signature_hex: &str,
    key_secret: &str,
) -> VerificationResult {
    let Ok(provided) = hex::decode(signature_hex) else {
        return VerificationResult::Rejected;
    };
    match mac_over(order_id, payment_id, key_secret).verify_slice(&provided) {
        Ok(()) => VerificationResult::Accepted,
        Err(_) => VerificationResult::Rejected,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
