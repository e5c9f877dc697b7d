//! Runtime secret resolution.
//!
//! This crate is the **single source of truth** for gateway credentials.
//!
//! # Contract
//! - Credentials are carried in two env vars: [`KEY_ID_VAR`] (public key id,
//!   embedded in create-order responses so the client can launch the
//!   gateway's collection UI) and [`KEY_SECRET_VAR`] (private signing key,
//!   never leaves the process).
//! - Callers invoke [`resolve_secrets`] once at startup and pass the
//!   returned [`ResolvedSecrets`] into constructors; never scatter
//!   `std::env::var` calls across the codebase.
//! - `Debug` on [`ResolvedSecrets`] **redacts** values.
//! - Error messages reference the env var **NAME**, never the value.
//!
//! # Fail-closed enforcement
//! A missing or blank secret does not abort the process; endpoints that
//! need it refuse per-request with a configuration error *before* any
//! network call, via [`ResolvedSecrets::require`].  A configuration failure
//! is its own error kind, never conflated with a payment failure.

// ---------------------------------------------------------------------------
// Env var names
// ---------------------------------------------------------------------------

/// Public gateway key identifier.
pub const KEY_ID_VAR: &str = "RAZORPAY_KEY_ID";

/// Private gateway signing key.
pub const KEY_SECRET_VAR: &str = "RAZORPAY_KEY_SECRET";

// ---------------------------------------------------------------------------
// SecretsError
// ---------------------------------------------------------------------------

/// A required secret was not available.  Fatal to the operation that needed
/// it; surfaced to the caller, never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsError {
    /// The named env var is unset or blank.  Carries the NAME only.
    Missing { var: &'static str, what: &'static str },
}

impl std::fmt::Display for SecretsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretsError::Missing { var, what } => write!(
                f,
                "SECRETS_MISSING: required env var '{var}' ({what}) is not set or empty"
            ),
        }
    }
}

impl std::error::Error for SecretsError {}

// ---------------------------------------------------------------------------
// ResolvedSecrets
// ---------------------------------------------------------------------------

/// Gateway credentials resolved from the environment.
///
/// Built **once** at startup via [`resolve_secrets`] (or
/// [`resolve_secrets_from`] in tests) and passed into constructors.
/// **Values are redacted in `Debug` output.**
#[derive(Clone, Default)]
pub struct ResolvedSecrets {
    /// Public key id. `None` if the env var was absent or blank.
    pub key_id: Option<String>,
    /// Private signing key. `None` if the env var was absent or blank.
    pub key_secret: Option<String>,
}

impl std::fmt::Debug for ResolvedSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print credential values.
        f.debug_struct("ResolvedSecrets")
            .field("key_id", &self.key_id.as_ref().map(|_| "<REDACTED>"))
            .field("key_secret", &self.key_secret.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl ResolvedSecrets {
    /// Both credentials, or the first missing one as an error.
    ///
    /// The create-transaction path needs both: the secret authenticates the
    /// order-creation call, the key id is returned to the client.
    pub fn require(&self) -> Result<(&str, &str), SecretsError> {
        let key_id = self.key_id.as_deref().ok_or(SecretsError::Missing {
            var: KEY_ID_VAR,
            what: "gateway key id",
        })?;
        let key_secret = self.key_secret.as_deref().ok_or(SecretsError::Missing {
            var: KEY_SECRET_VAR,
            what: "gateway signing key",
        })?;
        Ok((key_id, key_secret))
    }

    /// The signing key alone (payment verification needs no key id).
    pub fn require_key_secret(&self) -> Result<&str, SecretsError> {
        self.key_secret.as_deref().ok_or(SecretsError::Missing {
            var: KEY_SECRET_VAR,
            what: "gateway signing key",
        })
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve credentials from the process environment.
pub fn resolve_secrets() -> ResolvedSecrets {
    resolve_secrets_from(|name| std::env::var(name).ok())
}

/// Resolve credentials through an injectable lookup.  A blank value (after
/// trimming) counts as absent, same as an unset variable.
///
/// Production uses [`resolve_secrets`]; tests pass a closure over a fixed
/// map so they never touch process-global env state.
pub fn resolve_secrets_from<F>(lookup: F) -> ResolvedSecrets
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| -> Option<String> {
        let v = lookup(name)?;
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    ResolvedSecrets {
        key_id: non_blank(KEY_ID_VAR),
        key_secret: non_blank(KEY_SECRET_VAR),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
