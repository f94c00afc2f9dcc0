//! # Amount Module
//!
//! Provides the `Amount` type for values moving in and out of the till.
//!
//! ## Why Whole Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A till only ever moves whole notes.                                    │
//! │                                                                         │
//! │  The smallest note (2) is far above any fractional unit, so amounts    │
//! │  are whole currency units with no minor part.                           │
//! │                                                                         │
//! │  UNSIGNED: a negative withdrawal is unrepresentable, not validated.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::amount::Amount;
//!
//! let requested = Amount::new(260);
//! let change = requested - Amount::new(200);
//! assert_eq!(change.value(), 60);
//! assert_eq!((change * 2).value(), 120);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Amount Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: withdrawals and balances are never negative
/// - **Single field tuple struct**: zero-cost abstraction over u64
/// - **Transparent serde**: serializes as a bare number
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Largest representable amount.
    pub const MAX: Amount = Amount(u64::MAX);

    /// Creates an amount from whole units.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Amount(value)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Addition that reports overflow instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::amount::Amount;
    ///
    /// assert_eq!(Amount::new(1).checked_add(Amount::new(2)), Some(Amount::new(3)));
    /// assert_eq!(Amount::MAX.checked_add(Amount::new(1)), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Amount) -> Option<Amount> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Amount(v)),
            None => None,
        }
    }

    /// Subtraction that reports underflow instead of wrapping.
    #[inline]
    pub const fn checked_sub(self, other: Amount) -> Option<Amount> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Amount(v)),
            None => None,
        }
    }

    /// Multiplication by a note count that reports overflow.
    #[inline]
    pub const fn checked_mul(self, count: u32) -> Option<Amount> {
        match self.0.checked_mul(count as u64) {
            Some(v) => Some(Amount(v)),
            None => None,
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ## Panics
/// Panics if the sum exceeds [`Amount::MAX`]; see [`Amount::checked_add`].
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.checked_add(other).expect("Amount addition overflowed")
    }
}

impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// ## Panics
/// Panics if `other` is larger than `self`. Use [`Amount::checked_sub`]
/// when the operands are not already known to be ordered.
impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.checked_sub(other).expect("Amount subtraction underflowed")
    }
}

/// Multiplication by a note count.
///
/// ## Panics
/// Panics if the product exceeds [`Amount::MAX`]. Use
/// [`Amount::checked_mul`] for counts that are not already bounded.
impl Mul<u32> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        self.checked_mul(count).expect("Amount multiplication overflowed")
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
