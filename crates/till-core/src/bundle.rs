//! # Note Bundles
//!
//! A `NoteBundle` is a handful of notes: what a customer hands over on a
//! deposit, or what the till hands back on a withdrawal.
//!
//! ## Invariants
//! - Every stored count is positive; empty entries are never stored
//! - Iteration is largest face value first, so formatting is stable

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::amount::Amount;
use crate::denomination::Denomination;
use crate::error::ValidationError;
use crate::validation::{validate_note_count, ValidationResult};

/// Denomination → positive note count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Denomination, u32>",
    into = "BTreeMap<Denomination, u32>"
)]
pub struct NoteBundle {
    notes: BTreeMap<Denomination, u32>,
}

impl NoteBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        NoteBundle::default()
    }

    /// Builds a bundle from raw `(face value, count)` pairs.
    ///
    /// ## Rules
    /// - Face values must be positive
    /// - Counts must be positive
    /// - Repeated face values are summed
    ///
    /// ## Example
    /// ```rust
    /// use till_core::bundle::NoteBundle;
    ///
    /// let bundle = NoteBundle::from_pairs([(200, 1), (50, 2), (10, 3)]).unwrap();
    /// assert_eq!(bundle.total().value(), 330);
    /// assert_eq!(bundle.to_string(), "1x 200, 2x 50, 3x 10");
    ///
    /// assert!(NoteBundle::from_pairs([(50, 0)]).is_err());
    /// ```
    pub fn from_pairs<I>(pairs: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut bundle = NoteBundle::new();

        for (face_value, count) in pairs {
            let denomination = Denomination::new(face_value)?;
            validate_note_count(count)?;

            let entry = bundle.notes.entry(denomination).or_insert(0);
            *entry = entry
                .checked_add(count)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "note count".to_string(),
                    reason: format!("too many {} notes", denomination),
                })?;
        }

        Ok(bundle)
    }

    /// Records `count` notes of `denomination`. A zero count is ignored.
    pub(crate) fn insert(&mut self, denomination: Denomination, count: u32) {
        if count > 0 {
            self.notes.insert(denomination, count);
        }
    }

    /// Number of notes of `denomination` in the bundle (0 when absent).
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.notes.get(&denomination).copied().unwrap_or(0)
    }

    /// Iterates `(denomination, count)` largest face value first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.notes.iter().rev().map(|(d, c)| (*d, *c))
    }

    /// Total value of the bundle.
    pub fn total(&self) -> Amount {
        self.iter().map(|(d, count)| d.value_of(count)).sum()
    }

    /// Total number of physical notes.
    pub fn note_count(&self) -> u64 {
        self.notes.values().map(|&c| c as u64).sum()
    }

    /// Number of distinct denominations present.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Renders the bundle as `"<count>x <denomination>"` entries joined by
    /// `", "`, largest face value first. An empty bundle renders as `""`.
    pub fn format_notes(&self) -> String {
        self.iter()
            .map(|(d, count)| format!("{}x {}", count, d))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Deserialization path: every count must be positive.
impl TryFrom<BTreeMap<Denomination, u32>> for NoteBundle {
    type Error = ValidationError;

    fn try_from(notes: BTreeMap<Denomination, u32>) -> Result<Self, Self::Error> {
        for &count in notes.values() {
            validate_note_count(count)?;
        }
        Ok(NoteBundle { notes })
    }
}

impl From<NoteBundle> for BTreeMap<Denomination, u32> {
    fn from(bundle: NoteBundle) -> Self {
        bundle.notes
    }
}

impl fmt::Display for NoteBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_notes())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
