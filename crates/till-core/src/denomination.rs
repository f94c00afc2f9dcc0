//! # Denominations
//!
//! The face values a till can hold, and the fixed set a till is built with.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────┐       │
//! │  │  Denomination   │        │        DenominationSet           │       │
//! │  │  ─────────────  │  n..1  │  ──────────────────────────────  │       │
//! │  │  face (u32 > 0) │ ─────► │  distinct, non-empty             │       │
//! │  └─────────────────┘        │  sorted by face, DESCENDING      │       │
//! │                             │  fixed at construction           │       │
//! │                             └──────────────────────────────────┘       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The descending order is established once here. The withdrawal planner
//! walks it as-is and never re-sorts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::validation::{validate_denomination_value, ValidationResult};

/// Face values of the reference note series, largest first.
pub const STANDARD_FACE_VALUES: [u32; 7] = [200, 100, 50, 20, 10, 5, 2];

// =============================================================================
// Denomination
// =============================================================================

/// A single note face value. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Denomination(u32);

impl Denomination {
    /// Creates a denomination, rejecting a zero face value.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::denomination::Denomination;
    ///
    /// assert_eq!(Denomination::new(50).unwrap().face_value(), 50);
    /// assert!(Denomination::new(0).is_err());
    /// ```
    pub fn new(face_value: u32) -> ValidationResult<Self> {
        validate_denomination_value(face_value)?;
        Ok(Denomination(face_value))
    }

    /// Returns the face value.
    #[inline]
    pub const fn face_value(&self) -> u32 {
        self.0
    }

    /// Value of `count` notes of this denomination.
    #[inline]
    pub fn value_of(&self, count: u32) -> Amount {
        Amount::new(self.0 as u64) * count
    }
}

impl TryFrom<u32> for Denomination {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Denomination::new(value)
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> Self {
        d.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Denomination Set
// =============================================================================

/// The fixed list of denominations a till holds, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationSet {
    values: Vec<Denomination>,
}

impl DenominationSet {
    /// Builds a set from raw face values in any order.
    ///
    /// ## Rules
    /// - At least one value
    /// - Every value positive
    /// - No value repeated
    ///
    /// ## Example
    /// ```rust
    /// use till_core::denomination::DenominationSet;
    ///
    /// let set = DenominationSet::new([10, 50, 20]).unwrap();
    /// let faces: Vec<u32> = set.iter().map(|d| d.face_value()).collect();
    /// assert_eq!(faces, vec![50, 20, 10]);
    ///
    /// assert!(DenominationSet::new([10, 10]).is_err());
    /// assert!(DenominationSet::new(Vec::<u32>::new()).is_err());
    /// ```
    pub fn new<I>(face_values: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut values = face_values
            .into_iter()
            .map(Denomination::new)
            .collect::<ValidationResult<Vec<_>>>()?;

        if values.is_empty() {
            return Err(ValidationError::Required {
                field: "denominations".to_string(),
            });
        }

        values.sort_unstable_by(|a, b| b.cmp(a));

        if let Some(pair) = values.windows(2).find(|w| w[0] == w[1]) {
            return Err(ValidationError::Duplicate {
                field: "denomination".to_string(),
                value: pair[0].to_string(),
            });
        }

        Ok(DenominationSet { values })
    }

    /// The reference series: 200, 100, 50, 20, 10, 5, 2.
    pub fn standard() -> Self {
        DenominationSet {
            values: STANDARD_FACE_VALUES.iter().map(|&v| Denomination(v)).collect(),
        }
    }

    /// Iterates largest face value first.
    pub fn iter(&self) -> impl Iterator<Item = Denomination> + '_ {
        self.values.iter().copied()
    }

    pub fn contains(&self, denomination: Denomination) -> bool {
        self.values.contains(&denomination)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for DenominationSet {
    fn default() -> Self {
        DenominationSet::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
