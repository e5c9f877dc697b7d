//! The checkout state machine.
//!
//! ```text
//! Idle ──► OrderCreated ──► AwaitingGatewayCompletion ──► Verifying ──► Committed
//!                                      │                      │
//!                                      │ (abandoned: stays)   └────────► Failed
//!                                      ▼
//!                          AwaitingGatewayCompletion
//! ```
//!
//! `begin` covers `Idle → OrderCreated → AwaitingGatewayCompletion`: the
//! cart snapshot is captured atomically with entry into `OrderCreated`, so
//! the amount the gateway charges and the items eventually recorded can
//! never diverge.  `complete` consumes the gateway's completion handoff
//! exactly once and covers the rest.

use shp_cart::{Cart, CartSnapshot};
use shp_gateway::PaymentGateway;
use shp_schemas::{GatewayOrder, IdentityKey, OrderRecord, PaymentAssertion};
use shp_verify::VerificationResult;
use tracing::{debug, info, warn};

use crate::error::CheckoutError;
use crate::ledger_store::{LedgerStore, OrderDraft};

// ---------------------------------------------------------------------------
// States and handoff values
// ---------------------------------------------------------------------------

/// Lifecycle of one checkout attempt.  Transitions are one-directional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    OrderCreated,
    AwaitingGatewayCompletion,
    Verifying,
    Committed,
    Failed,
}

impl CheckoutState {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::OrderCreated => "order_created",
            CheckoutState::AwaitingGatewayCompletion => "awaiting_gateway_completion",
            CheckoutState::Verifying => "verifying",
            CheckoutState::Committed => "committed",
            CheckoutState::Failed => "failed",
        }
    }
}

/// The single completion handoff from the gateway's client-side flow:
/// either a payment assertion, or the user walked away.
#[derive(Debug, Clone)]
pub enum GatewayCompletion {
    Assertion(PaymentAssertion),
    Abandoned,
}

/// What a consumed completion produced.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Payment verified; the record is durably in the ledger and the cart
    /// has been cleared.
    Committed(OrderRecord),
    /// The user abandoned the external collection step.  Nothing was
    /// written; the cart is intact.  Not an error.
    Abandoned,
}

// ---------------------------------------------------------------------------
// CheckoutAttempt
// ---------------------------------------------------------------------------

/// One checkout attempt.  Holds the cart snapshot and gateway order from
/// `begin` until the completion handoff resolves it.
#[derive(Debug)]
pub struct CheckoutAttempt {
    state: CheckoutState,
    snapshot: CartSnapshot,
    order: GatewayOrder,
}

impl CheckoutAttempt {
    /// Open a gateway order for the cart's current total.
    ///
    /// Refuses an empty cart.  The snapshot (items AND total) is taken as
    /// one unit before the gateway call; later cart mutation cannot affect
    /// this attempt.  On success the attempt suspends in
    /// `AwaitingGatewayCompletion`; the externally-controlled collection
    /// step owns it from here, for however long that takes.
    pub async fn begin<G>(cart: &Cart, gateway: &G) -> Result<CheckoutAttempt, CheckoutError>
    where
        G: PaymentGateway + ?Sized,
    {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let snapshot = cart.snapshot();
        debug!(total = %snapshot.total, lines = snapshot.items.len(), "checkout: snapshot taken");

        let order = gateway.create_order(snapshot.total).await?;
        info!(
            order_id = %order.order_id,
            amount_paise = %order.amount,
            "checkout: gateway order created, awaiting completion"
        );

        Ok(CheckoutAttempt {
            state: CheckoutState::AwaitingGatewayCompletion,
            snapshot,
            order,
        })
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The gateway order this attempt opened.
    pub fn order(&self) -> &GatewayOrder {
        &self.order
    }

    /// The cart contents this attempt will commit.
    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Consume the gateway's completion handoff.
    ///
    /// Valid only in `AwaitingGatewayCompletion`.
    ///
    /// - `Abandoned`: the attempt stays where it is, a safe terminal-by-
    ///   abandonment state.  Cart intact, no ledger entry.
    /// - `Assertion`: the assertion must target this attempt's gateway
    ///   order; its signature is then verified.  On acceptance the snapshot
    ///   is appended to the ledger and **only then** is the cart cleared.
    ///   Any failure leaves the cart exactly as it was.
    pub fn complete<L>(
        &mut self,
        completion: GatewayCompletion,
        key_secret: &str,
        identity: &IdentityKey,
        ledger: &L,
        cart: &mut Cart,
    ) -> Result<CheckoutOutcome, CheckoutError>
    where
        L: LedgerStore + ?Sized,
    {
        if self.state != CheckoutState::AwaitingGatewayCompletion {
            return Err(CheckoutError::InvalidTransition {
                from: self.state.as_str(),
                op: "complete",
            });
        }

        let assertion = match completion {
            GatewayCompletion::Abandoned => {
                info!(order_id = %self.order.order_id, "checkout: abandoned at gateway");
                return Ok(CheckoutOutcome::Abandoned);
            }
            GatewayCompletion::Assertion(a) => a,
        };

        self.state = CheckoutState::Verifying;

        if assertion.order_id != self.order.order_id {
            self.state = CheckoutState::Failed;
            return Err(CheckoutError::WrongOrder {
                expected: self.order.order_id.clone(),
                got: assertion.order_id,
            });
        }

        match shp_verify::verify(
            &assertion.order_id,
            &assertion.payment_id,
            &assertion.signature,
            key_secret,
        ) {
            VerificationResult::Rejected => {
                warn!(order_id = %assertion.order_id, "checkout: signature rejected");
                self.state = CheckoutState::Failed;
                Err(CheckoutError::SignatureMismatch)
            }
            VerificationResult::Accepted => {
                let draft = OrderDraft {
                    items: self.snapshot.items.clone(),
                    total: self.snapshot.total,
                    payment_id: assertion.payment_id,
                    order_id: assertion.order_id,
                };
                // Ledger write first; a failure here must not clear the cart.
                match ledger.append(identity, draft) {
                    Err(e) => {
                        warn!(reason = %e.reason, "checkout: ledger append failed, cart preserved");
                        self.state = CheckoutState::Failed;
                        Err(CheckoutError::Ledger(e))
                    }
                    Ok(record) => {
                        cart.clear();
                        self.state = CheckoutState::Committed;
                        info!(order_record_id = record.id, "checkout: committed");
                        Ok(CheckoutOutcome::Committed(record))
                    }
                }
            }
        }
    }
}
