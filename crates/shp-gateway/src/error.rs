//! Gateway error taxonomy.
//!
//! Three externally-meaningful kinds plus local input validation:
//!
//! - `Configuration`: credentials absent or malformed.  Fatal to the whole
//!   checkout, surfaced immediately, never retried automatically.
//! - `Rejected`: the remote side declined.  The gateway's reason is
//!   surfaced verbatim; no retry.
//! - `Transport`: network or parse failure talking to the gateway.  The
//!   caller may re-initiate a fresh checkout attempt.
//! - `InvalidAmount`: caught before any network call.

/// The reason an order-creation handshake failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credentials missing or unusable.  Distinct from a payment failure.
    Configuration(String),
    /// Amount is not a positive, representable major-unit integer.
    InvalidAmount(i64),
    /// Gateway responded non-success.  `status` is the remote HTTP status;
    /// `reason` is the gateway's own description, surfaced verbatim.
    Rejected { status: u16, reason: String },
    /// Network or response-decoding failure.
    Transport(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Configuration(msg) => {
                write!(f, "GATEWAY_CONFIG: {msg}")
            }
            GatewayError::InvalidAmount(raw) => {
                write!(
                    f,
                    "GATEWAY_INVALID_AMOUNT: {raw} is not a positive major-unit amount"
                )
            }
            GatewayError::Rejected { status, reason } => {
                write!(f, "GATEWAY_REJECTED[{status}]: {reason}")
            }
            GatewayError::Transport(msg) => {
                write!(f, "GATEWAY_TRANSPORT: {msg}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}
