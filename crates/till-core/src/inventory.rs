//! # Inventory
//!
//! The notes physically held by a till.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  slots (one per configured denomination, largest first)                 │
//! │                                                                         │
//! │   ┌───────┬───────┬───────┬───────┬───────┬───────┬───────┐            │
//! │   │ 200:1 │ 100:0 │ 50:2  │ 20:0  │ 10:3  │  5:0  │  2:0  │            │
//! │   └───────┴───────┴───────┴───────┴───────┴───────┴───────┘            │
//! │                                                                         │
//! │  • The slot list is created once from a DenominationSet and never      │
//! │    gains or loses entries.                                              │
//! │  • Counts are u32, so they can never go below zero.                    │
//! │  • Only the till mutates counts (credit on deposit, debit on a         │
//! │    committed withdrawal).                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::amount::Amount;
use crate::bundle::NoteBundle;
use crate::denomination::{Denomination, DenominationSet};
use crate::error::{CoreError, CoreResult};
use crate::validation::validate_note_count;

/// One denomination and how many of its notes are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub denomination: Denomination,
    pub count: u32,
}

/// Per-denomination note counts over a fixed denomination set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    slots: Vec<Slot>,
}

impl Inventory {
    /// Creates an empty inventory holding zero notes of every denomination.
    pub fn empty(denominations: &DenominationSet) -> Self {
        Inventory {
            slots: denominations
                .iter()
                .map(|denomination| Slot {
                    denomination,
                    count: 0,
                })
                .collect(),
        }
    }

    /// Notes held of `denomination`, or `None` if the till does not carry it.
    pub fn count(&self, denomination: Denomination) -> Option<u32> {
        self.slot(denomination).map(|s| s.count)
    }

    /// Iterates every slot, largest face value first, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.iter().copied()
    }

    /// Sum of face value × count over every slot.
    ///
    /// Deposits refuse anything that would overflow this sum, so it is
    /// always representable.
    pub fn balance(&self) -> Amount {
        self.slots
            .iter()
            .map(|s| s.denomination.value_of(s.count))
            .sum()
    }

    /// Non-empty slots as a bundle.
    pub fn available_notes(&self) -> NoteBundle {
        let mut bundle = NoteBundle::new();
        for slot in &self.slots {
            bundle.insert(slot.denomination, slot.count);
        }
        bundle
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.count == 0)
    }

    /// Adds every note in `bundle`, or nothing at all.
    ///
    /// The whole bundle is checked (positive counts, membership, per-slot
    /// overflow, balance overflow) before the first count is changed.
    pub(crate) fn credit(&mut self, bundle: &NoteBundle) -> CoreResult<()> {
        let mut updated = Vec::with_capacity(bundle.len());

        for (denomination, count) in bundle.iter() {
            validate_note_count(count)?;

            let index = self
                .index_of(denomination)
                .ok_or(CoreError::UnknownDenomination { denomination })?;

            let new_count = self.slots[index].count.checked_add(count).ok_or(
                CoreError::CapacityExceeded {
                    denomination,
                    requested: count,
                },
            )?;
            updated.push((index, new_count));
        }

        self.balance()
            .checked_add(checked_total(bundle)?)
            .ok_or(CoreError::BalanceOverflow { max: Amount::MAX })?;

        for (index, new_count) in updated {
            self.slots[index].count = new_count;
        }

        Ok(())
    }

    /// Removes exactly the notes in `bundle`.
    ///
    /// Called only with a bundle produced by the withdrawal planner against
    /// this same inventory, so every denomination is present and every
    /// count is covered. The bound was established while planning and is
    /// not re-checked here.
    pub(crate) fn debit(&mut self, bundle: &NoteBundle) {
        for slot in self.slots.iter_mut() {
            slot.count -= bundle.count(slot.denomination);
        }
    }

    fn index_of(&self, denomination: Denomination) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.denomination == denomination)
    }

    fn slot(&self, denomination: Denomination) -> Option<&Slot> {
        self.slots.iter().find(|s| s.denomination == denomination)
    }
}

/// Bundle total with overflow reported as a balance overflow.
fn checked_total(bundle: &NoteBundle) -> CoreResult<Amount> {
    bundle.iter().try_fold(Amount::zero(), |acc, (d, count)| {
        acc.checked_add(d.value_of(count))
            .ok_or(CoreError::BalanceOverflow { max: Amount::MAX })
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
