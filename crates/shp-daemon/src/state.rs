//! Shared runtime state for shp-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum.  The daemon is
//! stateless with respect to checkout attempts (the orchestrator and the
//! order ledger live client-side; this process only fronts the gateway
//! handshake), so the state here is credentials plus the wired adapter.

use std::sync::Arc;

use shp_config::ResolvedSecrets;
use shp_gateway::{PaymentGateway, RazorpayGateway};
use tracing::warn;

// ---------------------------------------------------------------------------
// BuildInfo
// ---------------------------------------------------------------------------

/// Static build metadata included in health responses.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Static build metadata.
    pub build: BuildInfo,
    /// Resolved gateway credentials.  Endpoints that need a missing
    /// credential refuse per-request (fail-closed) rather than at boot.
    pub secrets: ResolvedSecrets,
    /// The wired gateway adapter; `None` when credentials are incomplete.
    pub gateway: Option<Arc<dyn PaymentGateway>>,
}

impl AppState {
    /// Wire the live adapter from resolved secrets.  With incomplete
    /// credentials the daemon still serves; create-order refuses with a
    /// configuration error on every request until the env is fixed.
    pub fn new(secrets: ResolvedSecrets) -> Self {
        let gateway: Option<Arc<dyn PaymentGateway>> =
            match RazorpayGateway::from_secrets(&secrets) {
                Ok(gw) => Some(Arc::new(gw)),
                Err(e) => {
                    warn!(%e, "gateway credentials incomplete; create-order will fail closed");
                    None
                }
            };
        Self::with_gateway(secrets, gateway)
    }

    /// Explicit wiring; scenario tests inject a mock adapter here.
    pub fn with_gateway(
        secrets: ResolvedSecrets,
        gateway: Option<Arc<dyn PaymentGateway>>,
    ) -> Self {
        Self {
            build: BuildInfo {
                service: "shp-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            secrets,
            gateway,
        }
    }
}
