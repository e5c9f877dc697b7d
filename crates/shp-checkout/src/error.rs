//! Checkout error taxonomy.

use crate::ledger_store::LedgerError;
use shp_gateway::GatewayError;

/// The reason a checkout attempt failed (or could not start).
#[derive(Debug)]
pub enum CheckoutError {
    /// Checkout invoked on an empty cart.
    EmptyCart,
    /// Order creation handshake failed; see the inner gateway error.
    Gateway(GatewayError),
    /// The completion assertion names a different gateway order than the
    /// one this attempt opened.
    WrongOrder { expected: String, got: String },
    /// Signature verification rejected the payment.  Distinct from any
    /// configuration failure; the cart is preserved for retry.
    SignatureMismatch,
    /// Ledger append failed; the cart was left untouched.
    Ledger(LedgerError),
    /// An operation was invoked in a state that does not permit it.
    InvalidTransition { from: &'static str, op: &'static str },
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::EmptyCart => {
                write!(f, "CHECKOUT_EMPTY_CART: nothing to check out")
            }
            CheckoutError::Gateway(e) => write!(f, "{e}"),
            CheckoutError::WrongOrder { expected, got } => write!(
                f,
                "CHECKOUT_WRONG_ORDER: assertion targets '{got}', attempt holds '{expected}'"
            ),
            CheckoutError::SignatureMismatch => {
                write!(f, "CHECKOUT_SIGNATURE_MISMATCH: payment verification failed")
            }
            CheckoutError::Ledger(e) => write!(f, "{e}"),
            CheckoutError::InvalidTransition { from, op } => {
                write!(f, "CHECKOUT_INVALID_TRANSITION: '{op}' is not valid in state '{from}'")
            }
        }
    }
}

impl std::error::Error for CheckoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckoutError::Gateway(e) => Some(e),
            CheckoutError::Ledger(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GatewayError> for CheckoutError {
    fn from(e: GatewayError) -> Self {
        CheckoutError::Gateway(e)
    }
}

impl From<LedgerError> for CheckoutError {
    fn from(e: LedgerError) -> Self {
        CheckoutError::Ledger(e)
    }
}
