//! Axum router and all HTTP handlers for shp-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and
//! attaches middleware layers.  All handlers are `pub(crate)` so the
//! scenario tests in `tests/` can compose the router directly.
//!
//! # Status code mapping
//! | Condition                         | Status                 |
//! |-----------------------------------|------------------------|
//! | credentials missing               | 500 (before any I/O)   |
//! | amount not a positive integer     | 400                    |
//! | gateway rejected the order        | the gateway's status   |
//! | transport / decode failure        | 500                    |
//! | signature mismatch                | 400                    |
//! | malformed body                    | extractor 4xx          |
//!
//! Every failure is the uniform `{success: false, error}` envelope.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shp_gateway::GatewayError;
use shp_schemas::Rupees;
use shp_verify::VerificationResult;
use tracing::{info, warn};

use crate::{
    api_types::{
        CreateOrderRequest, CreateOrderResponse, ErrorResponse, HealthResponse, OrderBody,
        VerifyPaymentRequest, VerifyPaymentResponse,
    },
    state::AppState,
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/checkout/create-order", post(create_order))
        .route("/v1/checkout/verify-payment", post(verify_payment))
        .with_state(state)
}

/// The uniform failure envelope.
fn refuse(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /v1/checkout/create-order
// ---------------------------------------------------------------------------

/// Open a transaction at the gateway for the cart total.
///
/// # Gate
/// Fails closed with 500 when either credential is absent, checked before
/// any network call is attempted.  A configuration failure is never
/// reported as a payment failure.
pub(crate) async fn create_order(
    State(st): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Response {
    // Fail closed: both credentials must be present before we touch the wire.
    let key_id = match st.secrets.require() {
        Ok((key_id, _)) => key_id.to_string(),
        Err(e) => {
            warn!(%e, "create-order refused: credentials missing");
            return refuse(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };
    let Some(gateway) = &st.gateway else {
        // Secrets present but no adapter wired: same configuration failure.
        return refuse(
            StatusCode::INTERNAL_SERVER_ERROR,
            "GATEWAY_CONFIG: no payment gateway adapter is wired",
        );
    };

    if req.amount <= 0 {
        return refuse(
            StatusCode::BAD_REQUEST,
            "amount must be a positive integer of major currency units",
        );
    }

    match gateway.create_order(Rupees::new(req.amount)).await {
        Ok(order) => {
            info!(order_id = %order.order_id, amount_paise = %order.amount, "order created");
            (
                StatusCode::OK,
                Json(CreateOrderResponse {
                    success: true,
                    order: OrderBody {
                        id: order.order_id,
                        amount: order.amount.raw(),
                        currency: order.currency,
                        receipt: order.receipt,
                    },
                    key_id,
                }),
            )
                .into_response()
        }
        Err(GatewayError::Rejected { status, reason }) => {
            // Propagate the gateway's own status; surface its reason verbatim.
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            refuse(status, reason)
        }
        Err(e @ GatewayError::InvalidAmount(_)) => refuse(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ GatewayError::Configuration(_)) => {
            refuse(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e @ GatewayError::Transport(_)) => {
            warn!(%e, "create-order transport failure");
            refuse(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// POST /v1/checkout/verify-payment
// ---------------------------------------------------------------------------

/// Verify a completion assertion against the shared signing key.
///
/// 400 on mismatch (a user-facing payment failure), 500 when the signing
/// key is not configured (never conflated with a payment failure).
pub(crate) async fn verify_payment(
    State(st): State<Arc<AppState>>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Response {
    let key_secret = match st.secrets.require_key_secret() {
        Ok(s) => s,
        Err(e) => {
            warn!(%e, "verify-payment refused: signing key missing");
            return refuse(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    match shp_verify::verify(
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
        key_secret,
    ) {
        VerificationResult::Accepted => {
            info!(order_id = %req.razorpay_order_id, "payment verified");
            (
                StatusCode::OK,
                Json(VerifyPaymentResponse {
                    success: true,
                    message: "Payment verified successfully".to_string(),
                    payment_id: req.razorpay_payment_id,
                    order_id: req.razorpay_order_id,
                }),
            )
                .into_response()
        }
        VerificationResult::Rejected => {
            warn!(order_id = %req.razorpay_order_id, "payment verification failed");
            refuse(StatusCode::BAD_REQUEST, "Payment verification failed")
        }
    }
}
