//! Abandonment of the external payment-collection step is an accepted,
//! non-committing outcome: the attempt never leaves
//! `AwaitingGatewayCompletion`, the cart is intact, and no ledger entry is
//! created.

use shp_cart::Cart;
use shp_checkout::{
    CheckoutAttempt, CheckoutOutcome, CheckoutState, GatewayCompletion,
};
use shp_ledger::OrderLedger;
use shp_schemas::{IdentityKey, Rupees};
use shp_testkit::{assertion_for, sample_products, MockGateway};

const SECRET: &str = "test-signing-key";

#[tokio::test]
async fn abandonment_leaves_everything_untouched() {
    let products = sample_products();
    let tmp = tempfile::tempdir().unwrap();
    let ledger = OrderLedger::new(tmp.path()).unwrap();
    let gateway = MockGateway::new();
    let alice = IdentityKey::new("alice");

    let mut cart = Cart::new();
    cart.add_item(&products[0]);

    let mut attempt = CheckoutAttempt::begin(&cart, &gateway).await.unwrap();

    let outcome = attempt
        .complete(
            GatewayCompletion::Abandoned,
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap();

    assert!(matches!(outcome, CheckoutOutcome::Abandoned));
    assert_eq!(
        attempt.state(),
        CheckoutState::AwaitingGatewayCompletion,
        "abandonment never advances the state machine"
    );
    assert_eq!(cart.total(), Rupees::new(2999), "cart unchanged");
    assert!(ledger.list_for(&alice).unwrap().is_empty(), "no ledger entry");
}

#[tokio::test]
async fn a_late_completion_after_abandonment_still_commits() {
    // The user closed the widget, then finished payment in a second
    // attempt at the gateway; the suspension point is still open.
    let products = sample_products();
    let tmp = tempfile::tempdir().unwrap();
    let ledger = OrderLedger::new(tmp.path()).unwrap();
    let gateway = MockGateway::new();
    let alice = IdentityKey::new("alice");

    let mut cart = Cart::new();
    cart.add_item(&products[0]);

    let mut attempt = CheckoutAttempt::begin(&cart, &gateway).await.unwrap();
    attempt
        .complete(
            GatewayCompletion::Abandoned,
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap();
    assert_eq!(attempt.state(), CheckoutState::AwaitingGatewayCompletion);

    let assertion = assertion_for(&attempt.order().order_id, "pay_late", SECRET);
    let outcome = attempt
        .complete(
            GatewayCompletion::Assertion(assertion),
            SECRET,
            &alice,
            &ledger,
            &mut cart,
        )
        .unwrap();

    assert!(matches!(outcome, CheckoutOutcome::Committed(_)));
    assert!(cart.is_empty());
    assert_eq!(ledger.list_for(&alice).unwrap().len(), 1);
}
