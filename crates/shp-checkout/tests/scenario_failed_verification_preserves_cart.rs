//! Failure paths: every non-committing outcome must leave the cart exactly
//! as it was, write nothing to the ledger, and surface the right error
//! kind.

use shp_cart::Cart;
use shp_checkout::{
    CheckoutAttempt, CheckoutError, CheckoutState, GatewayCompletion, LedgerError, LedgerStore,
    OrderDraft,
};
use shp_ledger::OrderLedger;
use shp_schemas::{IdentityKey, OrderRecord, Rupees};
use shp_testkit::{assertion_for, sample_products, tampered_assertion_for, MockGateway};

use shp_gateway::GatewayError;

const SECRET: &str = "test-signing-key";

/// Ledger stub whose every append fails (simulated write failure).
struct FailingLedger;

impl LedgerStore for FailingLedger {
    fn append(
        &self,
        _identity: &IdentityKey,
        _draft: OrderDraft,
    ) -> Result<OrderRecord, LedgerError> {
        Err(LedgerError::new("disk full"))
    }
}

#[tokio::test]
async fn tampered_signature_fails_and_preserves_cart() {
    let products = sample_products();
    let tmp = tempfile::tempdir().unwrap();
    let ledger = OrderLedger::new(tmp.path()).unwrap();
    let gateway = MockGateway::new();
    let alice = IdentityKey::new("alice");

    let mut cart = Cart::new();
    cart.add_item(&products[0]);

    let mut attempt = CheckoutAttempt::begin(&cart, &gateway).await.unwrap();
    let assertion = tampered_assertion_for(&attempt.order().order_id, "pay_1", SECRET);

    let err = attempt
        .complete(
            GatewayCompletion::Assertion(assertion),
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap_err();

    assert!(matches!(err, CheckoutError::SignatureMismatch));
    assert_eq!(attempt.state(), CheckoutState::Failed);
    assert_eq!(cart.total(), Rupees::new(2999), "cart preserved for retry");
    assert!(ledger.list_for(&alice).unwrap().is_empty(), "no ledger entry");
}

#[tokio::test]
async fn assertion_for_a_different_order_is_refused() {
    let products = sample_products();
    let tmp = tempfile::tempdir().unwrap();
    let ledger = OrderLedger::new(tmp.path()).unwrap();
    let gateway = MockGateway::new();
    let alice = IdentityKey::new("alice");

    let mut cart = Cart::new();
    cart.add_item(&products[0]);

    let mut attempt = CheckoutAttempt::begin(&cart, &gateway).await.unwrap();
    // Correctly signed, but for some other order entirely.
    let assertion = assertion_for("order_mock_999", "pay_1", SECRET);

    let err = attempt
        .complete(
            GatewayCompletion::Assertion(assertion),
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap_err();

    assert!(matches!(err, CheckoutError::WrongOrder { .. }));
    assert_eq!(attempt.state(), CheckoutState::Failed);
    assert!(!cart.is_empty());
    assert!(ledger.list_for(&alice).unwrap().is_empty());
}

#[tokio::test]
async fn ledger_failure_does_not_clear_the_cart() {
    let products = sample_products();
    let gateway = MockGateway::new();
    let alice = IdentityKey::new("alice");

    let mut cart = Cart::new();
    cart.add_item(&products[0]);
    cart.add_item(&products[1]);
    let total_before = cart.total();

    let mut attempt = CheckoutAttempt::begin(&cart, &gateway).await.unwrap();
    let assertion = assertion_for(&attempt.order().order_id, "pay_1", SECRET);

    let err = attempt
        .complete(
            GatewayCompletion::Assertion(assertion),
            SECRET,
            &alice,
            &FailingLedger,
            &mut cart,
        )
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Ledger(_)));
    assert_eq!(attempt.state(), CheckoutState::Failed);
    assert!(!cart.is_empty(), "a failed append must not destroy the cart");
    assert_eq!(cart.total(), total_before);
    assert_eq!(cart.len(), 2);
}

#[tokio::test]
async fn begin_refuses_an_empty_cart() {
    let gateway = MockGateway::new();
    let cart = Cart::new();

    let err = CheckoutAttempt::begin(&cart, &gateway).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(gateway.orders_created(), 0, "no gateway call for an empty cart");
}

#[tokio::test]
async fn gateway_rejection_surfaces_and_cart_is_untouched() {
    let products = sample_products();
    let gateway = MockGateway::rejecting(GatewayError::Rejected {
        status: 401,
        reason: "Authentication failed".to_string(),
    });

    let mut cart = Cart::new();
    cart.add_item(&products[0]);

    let err = CheckoutAttempt::begin(&cart, &gateway).await.unwrap_err();
    match err {
        CheckoutError::Gateway(GatewayError::Rejected { status, reason }) => {
            assert_eq!(status, 401);
            assert_eq!(reason, "Authentication failed");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(cart.total(), Rupees::new(2999));
}

#[tokio::test]
async fn terminal_attempts_refuse_further_completions() {
    let products = sample_products();
    let tmp = tempfile::tempdir().unwrap();
    let ledger = OrderLedger::new(tmp.path()).unwrap();
    let gateway = MockGateway::new();
    let alice = IdentityKey::new("alice");

    let mut cart = Cart::new();
    cart.add_item(&products[0]);

    let mut attempt = CheckoutAttempt::begin(&cart, &gateway).await.unwrap();
    let tampered = tampered_assertion_for(&attempt.order().order_id, "pay_1", SECRET);
    let _ = attempt
        .complete(
            GatewayCompletion::Assertion(tampered),
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap_err();
    assert_eq!(attempt.state(), CheckoutState::Failed);

    // Even a valid assertion cannot resurrect a failed attempt.
    let valid = assertion_for(&attempt.order().order_id, "pay_1", SECRET);
    let err = attempt
        .complete(
            GatewayCompletion::Assertion(valid),
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap_err();
    assert!(matches!(err, CheckoutError::InvalidTransition { .. }));
    assert!(ledger.list_for(&alice).unwrap().is_empty());
}
