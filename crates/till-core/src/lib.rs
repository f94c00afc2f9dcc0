//! # till-core: Pure Business Logic for a Cash Till
//!
//! This crate holds the note inventory of a cash till and decides which
//! notes to hand out for a withdrawal. It has no I/O: the only outside
//! input is the clock used to stamp journal entries, and that is injected.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Driver (apps/till-sim)                          │   │
//! │  │    env config ──► deposit / withdraw / check ──► stdout         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌───────────┐ ┌────────────┐ ┌───────────┐    │   │
//! │  │   │denomination│ │  bundle   │ │ inventory  │ │  journal  │    │   │
//! │  │   │  amount    │ │NoteBundle │ │  slots     │ │ LogEntry  │    │   │
//! │  │   └────────────┘ └───────────┘ └────────────┘ └───────────┘    │   │
//! │  │   ┌──────────────────────────┐ ┌───────────────────────────┐   │   │
//! │  │   │ till: greedy withdrawal  │ │ state: SharedTill (Mutex) │   │   │
//! │  │   └──────────────────────────┘ └───────────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • CLOCK INJECTED                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`amount`] - Whole-unit amount type
//! - [`denomination`] - Note face values and the fixed set a till holds
//! - [`bundle`] - Handfuls of notes (deposit input, withdrawal output)
//! - [`inventory`] - Per-denomination counts
//! - [`journal`] - Append-only event log and the `Clock` seam
//! - [`till`] - The till and its greedy withdrawal planner
//! - [`state`] - Thread-safe shared handle
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Amount, DenominationSet, NoteBundle, Till, WithdrawalOutcome};
//!
//! let mut till = Till::new(DenominationSet::standard());
//! till.deposit(&NoteBundle::from_pairs([(200, 1), (50, 2), (10, 3)]).unwrap()).unwrap();
//! assert_eq!(till.balance(), Amount::new(330));
//!
//! match till.withdraw(Amount::new(260)).unwrap() {
//!     WithdrawalOutcome::Dispensed { notes } => {
//!         assert_eq!(notes.to_string(), "1x 200, 1x 50, 1x 10");
//!     }
//!     WithdrawalOutcome::Declined { .. } => unreachable!(),
//! }
//! assert_eq!(till.balance(), Amount::new(70));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod bundle;
pub mod denomination;
pub mod error;
pub mod inventory;
pub mod journal;
pub mod state;
pub mod till;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::Amount;
pub use bundle::NoteBundle;
pub use denomination::{Denomination, DenominationSet};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{Inventory, Slot};
pub use journal::{Clock, EventCategory, FixedClock, Journal, LogEntry, SystemClock};
pub use state::SharedTill;
pub use till::{plan_withdrawal, Till, WithdrawalCheck, WithdrawalOutcome};
