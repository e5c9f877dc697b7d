//! Fixed-point money types.
//!
//! # Motivation
//!
//! Every monetary amount in this system is an integer.  Catalog prices and
//! cart totals are whole major units (`Rupees`); the gateway wire carries
//! minor units (`Paise`, 1 rupee = 100 paise).  Using raw `i64` for money is
//! error-prone: it allows accidental arithmetic with unrelated integers
//! (quantities, IDs) without any compile-time signal, and it invites
//! floating-point creep at the conversion boundary.
//!
//! # Conversion
//!
//! `Rupees::to_paise` is an exact, checked `× 100`.  There is no fractional
//! representation anywhere: a non-integer major amount is unrepresentable by
//! construction, so the conversion can never round or truncate.
//!
//! # Arithmetic
//!
//! - `checked_add` / `checked_mul_qty`: overflow returns `None`; callers
//!   must handle it explicitly.
//! - `saturating_add` / `saturating_mul_qty`: clamp at `i64::MAX`; used by
//!   cart accumulation where a fold must stay total.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// Minor units per major unit.
pub const PAISE_PER_RUPEE: i64 = 100;

// ---------------------------------------------------------------------------
// Rupees — major units
// ---------------------------------------------------------------------------

/// A whole-rupee monetary amount (major currency units).
///
/// There is intentionally no `From<i64>` impl; callers must be deliberate
/// about when a raw integer represents money.  Use [`Rupees::new`] to
/// construct and [`Rupees::raw`] to extract at layer boundaries.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(i64);

impl Rupees {
    /// Zero monetary amount.
    pub const ZERO: Rupees = Rupees(0);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Rupees(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// `true` for amounts a transaction can be opened for.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition; `None` on overflow.
    #[inline]
    pub fn checked_add(self, rhs: Rupees) -> Option<Rupees> {
        self.0.checked_add(rhs.0).map(Rupees)
    }

    /// Saturating addition; clamps at `i64::MAX` / `i64::MIN`.
    #[inline]
    pub fn saturating_add(self, rhs: Rupees) -> Rupees {
        Rupees(self.0.saturating_add(rhs.0))
    }

    /// Multiply a per-unit price by an integer quantity.
    ///
    /// Returns `None` on i64 overflow.  Callers MUST handle `None`
    /// explicitly; overflow in an order-value calculation is a critical
    /// error, not a routine saturation.
    #[inline]
    pub fn checked_mul_qty(self, qty: u32) -> Option<Rupees> {
        self.0.checked_mul(i64::from(qty)).map(Rupees)
    }

    /// Saturating variant of [`Rupees::checked_mul_qty`] for fold contexts.
    #[inline]
    pub fn saturating_mul_qty(self, qty: u32) -> Rupees {
        Rupees(self.0.saturating_mul(i64::from(qty)))
    }

    /// Exact conversion to minor units (`× 100`).  `None` on overflow.
    /// Never rounds: the input is already a whole number of major units.
    #[inline]
    pub fn to_paise(self) -> Option<Paise> {
        self.0.checked_mul(PAISE_PER_RUPEE).map(Paise)
    }
}

impl Add for Rupees {
    type Output = Rupees;
    #[inline]
    fn add(self, rhs: Rupees) -> Rupees {
        Rupees(self.0 + rhs.0)
    }
}

impl Sub for Rupees {
    type Output = Rupees;
    #[inline]
    fn sub(self, rhs: Rupees) -> Rupees {
        Rupees(self.0 - rhs.0)
    }
}

impl AddAssign for Rupees {
    #[inline]
    fn add_assign(&mut self, rhs: Rupees) {
        self.0 += rhs.0;
    }
}

impl std::fmt::Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Paise — minor units
// ---------------------------------------------------------------------------

/// A minor-unit monetary amount (paise) as transmitted to the gateway.
///
/// Produced by [`Rupees::to_paise`] or decoded from gateway responses;
/// never constructed by ad-hoc arithmetic elsewhere.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Paise(i64);

impl Paise {
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Paise(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
