//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Rejected till operations                       │
//! │  └── ValidationError  - Malformed input (amounts, counts, sets)        │
//! │                                                                         │
//! │  till-sim errors (binary)                                              │
//! │  └── ConfigError      - Unparsable environment configuration           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (driver)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! A withdrawal the greedy plan cannot satisfy is a normal business outcome
//! (`WithdrawalOutcome::Declined`), not an `Err`. Errors are reserved for
//! input that would corrupt the inventory if it were applied.

use thiserror::Error;

use crate::amount::Amount;
use crate::denomination::Denomination;

// =============================================================================
// Core Error
// =============================================================================

/// Rejected till operations.
///
/// Every variant is returned BEFORE the inventory is touched, so a caller
/// receiving one of these can assume the till is exactly as it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A deposit named a note the till was not configured for.
    ///
    /// ## When This Occurs
    /// ```text
    /// Till configured with: 200, 100, 50, 20, 10, 5, 2
    /// Deposit:              { 500: 1, 50: 2 }
    ///      │
    ///      ▼
    /// UnknownDenomination { denomination: 500 }
    ///      │
    ///      ▼
    /// Nothing applied (the 50s are NOT credited either)
    /// ```
    #[error("Denomination {denomination} is not held by this till")]
    UnknownDenomination { denomination: Denomination },

    /// A deposit would push a note count or the balance past what the
    /// till can represent.
    #[error("Depositing {requested}x {denomination} exceeds till capacity")]
    CapacityExceeded {
        denomination: Denomination,
        requested: u32,
    },

    /// The till balance would overflow.
    #[error("Till balance would exceed {max}")]
    BalanceOverflow { max: Amount },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when raw values (from config, a script, an IPC payload) cannot be
/// turned into domain types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value appears more than once where it must be unique.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// Invalid format (e.g., a non-numeric denomination).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
