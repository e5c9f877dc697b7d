//! shp-checkout
//!
//! Checkout Orchestrator: drives the end-to-end sequence
//! `snapshot cart → create gateway order → external collection →
//! verify signature → commit to ledger → clear cart`.
//!
//! # Invariants
//!
//! - The amount sent to the gateway equals the cart total **at the instant
//!   of entering `OrderCreated`**; the snapshot (items and total) taken
//!   there is what commits, regardless of intervening cart mutation.
//! - Ledger append happens **before** cart clear.  A failed append leaves
//!   the cart untouched; failure never destroys pending purchase intent.
//! - Transitions are one-directional; `Committed` and `Failed` are
//!   terminal.  A new attempt always begins a fresh cycle.
//! - Abandonment of the external collection step is a safe, non-committing
//!   outcome, not an error: the attempt simply never leaves
//!   `AwaitingGatewayCompletion`.
//!
//! The ledger is reached through the [`LedgerStore`] seam; production wires
//! `shp-ledger`, tests wire failing stubs.

mod attempt;
mod error;
mod ledger_store;

pub use attempt::{CheckoutAttempt, CheckoutOutcome, CheckoutState, GatewayCompletion};
pub use error::CheckoutError;
pub use ledger_store::{LedgerError, LedgerStore, OrderDraft};
