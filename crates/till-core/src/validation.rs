//! # Validation Module
//!
//! Input validation for raw values entering the till.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Driver (till-sim)                                            │
//! │  └── Parsing env/config strings into integers                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain constructors (THIS MODULE)                            │
//! │  ├── Denomination::new, NoteBundle::from_pairs                         │
//! │  └── Till::withdraw amount precondition                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Till                                                         │
//! │  └── Membership of the fixed denomination set, capacity                │
//! │                                                                         │
//! │  Nothing reaches the inventory until all three layers pass.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::amount::Amount;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a note face value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_denomination_value(face_value: u32) -> ValidationResult<()> {
    if face_value == 0 {
        return Err(ValidationError::MustBePositive {
            field: "denomination".to_string(),
        });
    }

    Ok(())
}

/// Validates a note count inside a bundle.
///
/// ## Rules
/// - Must be positive (> 0); bundles never carry empty entries
pub fn validate_note_count(count: u32) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "note count".to_string(),
        });
    }

    Ok(())
}

/// Validates a requested withdrawal amount.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// A zero request would "succeed" with no notes, which hides a caller bug.
///
/// ## Example
/// ```rust
/// use till_core::amount::Amount;
/// use till_core::validation::validate_amount;
///
/// assert!(validate_amount(Amount::new(260)).is_ok());
/// assert!(validate_amount(Amount::zero()).is_err());
/// ```
pub fn validate_amount(amount: Amount) -> ValidationResult<()> {
    if amount.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Parses a comma-separated list of face values (e.g. `"200,100,50"`).
///
/// Whitespace around entries is ignored. Uniqueness and ordering are left
/// to `DenominationSet::new`.
pub fn parse_face_values(raw: &str) -> ValidationResult<Vec<u32>> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "denominations".to_string(),
        });
    }

    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u32>()
                .map_err(|_| ValidationError::InvalidFormat {
                    field: "denomination".to_string(),
                    reason: format!("'{}' is not a whole number", part),
                })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
