//! # Till
//!
//! The cash till: a fixed denomination set, the notes held for each, and a
//! journal of everything that happened.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till Operations                                 │
//! │                                                                         │
//! │  Caller                    Till                    State Change         │
//! │  ──────                    ────                    ────────────         │
//! │                                                                         │
//! │  deposit(bundle) ────────► validate all ─────────► counts += bundle    │
//! │                            (or reject all)         + 1 journal entry    │
//! │                                                                         │
//! │  withdraw(amount) ───────► plan_withdrawal ──┬───► counts -= plan      │
//! │                                              │     + 1 journal entry    │
//! │                                              │     → Dispensed(plan)    │
//! │                                              │                          │
//! │                                              └───► counts untouched     │
//! │                                                    + 1 journal entry    │
//! │                                                    → Declined           │
//! │                                                                         │
//! │  check_withdrawal(amt) ──► plan_withdrawal ──────► + 1 journal entry   │
//! │                                                                         │
//! │  balance() ──────────────► Σ face × count ───────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Greedy Planning
//! Withdrawals are assembled largest note first, taking as many of each as
//! fit. This keeps the note count low but is NOT a complete change-making
//! search: with `{50: 1, 20: 3}` a request for 60 takes the 50, is left with
//! 10, and is declined even though three 20s would have worked. That is the
//! intended behavior.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::amount::Amount;
use crate::bundle::NoteBundle;
use crate::denomination::DenominationSet;
use crate::error::{CoreResult, ValidationError};
use crate::inventory::Inventory;
use crate::journal::{Clock, EventCategory, Journal, SystemClock};
use crate::validation::validate_amount;

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a withdrawal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WithdrawalOutcome {
    /// The notes handed out. Their total equals the requested amount.
    Dispensed { notes: NoteBundle },

    /// The amount could not be assembled; the till is unchanged.
    Declined { requested: Amount },
}

impl WithdrawalOutcome {
    pub fn is_dispensed(&self) -> bool {
        matches!(self, WithdrawalOutcome::Dispensed { .. })
    }

    /// The dispensed notes, if any.
    pub fn notes(&self) -> Option<&NoteBundle> {
        match self {
            WithdrawalOutcome::Dispensed { notes } => Some(notes),
            WithdrawalOutcome::Declined { .. } => None,
        }
    }

    pub fn into_notes(self) -> Option<NoteBundle> {
        match self {
            WithdrawalOutcome::Dispensed { notes } => Some(notes),
            WithdrawalOutcome::Declined { .. } => None,
        }
    }
}

/// Result of a dry-run withdrawal check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WithdrawalCheck {
    /// A withdrawal right now would dispense these notes.
    Possible { notes: NoteBundle },

    /// A withdrawal right now would be declined. `available` is what the
    /// till currently holds.
    Impossible { available: NoteBundle },
}

impl WithdrawalCheck {
    pub fn is_possible(&self) -> bool {
        matches!(self, WithdrawalCheck::Possible { .. })
    }
}

// =============================================================================
// Greedy Planner
// =============================================================================

/// Picks notes for `amount`, largest denomination first.
///
/// For each denomination in descending order, takes
/// `min(remaining / face, held)` notes. Returns the selection when the
/// remainder reaches exactly zero, `None` otherwise. Pure: the inventory is
/// only read.
///
/// ## Example
/// ```rust
/// use till_core::{plan_withdrawal, Amount, DenominationSet, NoteBundle, Till};
///
/// let mut till = Till::new(DenominationSet::standard());
/// till.deposit(&NoteBundle::from_pairs([(50, 1), (20, 1), (10, 1)]).unwrap()).unwrap();
///
/// let plan = plan_withdrawal(till.inventory(), Amount::new(60)).unwrap();
/// assert_eq!(plan.to_string(), "1x 50, 1x 10");
/// ```
pub fn plan_withdrawal(inventory: &Inventory, amount: Amount) -> Option<NoteBundle> {
    let mut remaining = amount.value();
    let mut selected = NoteBundle::new();

    for slot in inventory.iter() {
        let face = slot.denomination.face_value() as u64;
        let needed = remaining / face;
        let used = needed.min(slot.count as u64);

        if used > 0 {
            // used <= slot.count, so it fits back into u32
            selected.insert(slot.denomination, used as u32);
            remaining -= face * used;
        }
    }

    debug!(
        amount = %amount,
        remaining,
        selected = %selected,
        "Planned withdrawal"
    );

    if remaining == 0 {
        Some(selected)
    } else {
        None
    }
}

// =============================================================================
// Till
// =============================================================================

/// A cash till.
///
/// ## Invariants
/// - The set of denominations is fixed at construction
/// - No note count is ever negative
/// - A declined withdrawal or a rejected deposit leaves the counts exactly
///   as they were
/// - Every successful or declined operation appends one journal entry
#[derive(Debug)]
pub struct Till {
    inventory: Inventory,
    journal: Journal,
    clock: Box<dyn Clock>,
}

impl Till {
    /// Creates an empty till stamping its journal with wall-clock time.
    pub fn new(denominations: DenominationSet) -> Self {
        Till::with_clock(denominations, SystemClock)
    }

    /// Creates an empty till with an explicit clock.
    pub fn with_clock(denominations: DenominationSet, clock: impl Clock + 'static) -> Self {
        Till {
            inventory: Inventory::empty(&denominations),
            journal: Journal::new(),
            clock: Box::new(clock),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Total value held.
    pub fn balance(&self) -> Amount {
        self.inventory.balance()
    }

    /// Adds notes to the till.
    ///
    /// ## Errors
    /// The whole deposit is rejected, and nothing is journaled, when:
    /// - the bundle is empty or holds a zero count
    /// - any note is not one of the till's denominations
    /// - any count or the balance would overflow
    pub fn deposit(&mut self, bundle: &NoteBundle) -> CoreResult<()> {
        if bundle.is_empty() {
            warn!("Rejected empty deposit");
            return Err(ValidationError::Required {
                field: "deposit".to_string(),
            }
            .into());
        }

        if let Err(err) = self.inventory.credit(bundle) {
            warn!(error = %err, notes = %bundle, "Rejected deposit");
            return Err(err);
        }

        info!(
            notes = %bundle,
            balance = %self.balance(),
            "Deposit completed"
        );
        self.log(EventCategory::DepositCompleted, bundle.format_notes());

        Ok(())
    }

    /// Dispenses exactly `amount`, or declines.
    ///
    /// The plan is computed against the current counts and then applied
    /// as-is; `&mut self` guarantees nothing else touches the inventory in
    /// between.
    ///
    /// ## Errors
    /// `ValidationError::MustBePositive` for a zero amount. A request the
    /// till cannot satisfy is `Ok(WithdrawalOutcome::Declined { .. })`.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Amount, DenominationSet, NoteBundle, Till};
    ///
    /// let mut till = Till::new(DenominationSet::standard());
    /// till.deposit(&NoteBundle::from_pairs([(200, 1)]).unwrap()).unwrap();
    ///
    /// let first = till.withdraw(Amount::new(200)).unwrap();
    /// assert_eq!(first.notes().unwrap().to_string(), "1x 200");
    ///
    /// let second = till.withdraw(Amount::new(200)).unwrap();
    /// assert!(!second.is_dispensed());
    /// ```
    pub fn withdraw(&mut self, amount: Amount) -> CoreResult<WithdrawalOutcome> {
        validate_amount(amount)?;

        match plan_withdrawal(&self.inventory, amount) {
            Some(notes) => {
                self.inventory.debit(&notes);

                info!(
                    amount = %amount,
                    notes = %notes,
                    balance = %self.balance(),
                    "Withdrawal completed"
                );
                self.log(
                    EventCategory::WithdrawalCompleted,
                    format!("{} -> {}", amount, notes),
                );

                Ok(WithdrawalOutcome::Dispensed { notes })
            }
            None => {
                warn!(
                    amount = %amount,
                    balance = %self.balance(),
                    "Withdrawal declined"
                );
                self.log(
                    EventCategory::WithdrawalFailed,
                    format!(
                        "unable to assemble {} from the notes available",
                        amount
                    ),
                );

                Ok(WithdrawalOutcome::Declined { requested: amount })
            }
        }
    }

    /// Reports whether `amount` could be dispensed right now, without
    /// dispensing it.
    ///
    /// Appends one `withdrawal check` entry. When the answer is no, the
    /// entry lists the notes currently held.
    pub fn check_withdrawal(&mut self, amount: Amount) -> CoreResult<WithdrawalCheck> {
        validate_amount(amount)?;

        let check = match plan_withdrawal(&self.inventory, amount) {
            Some(notes) => {
                self.log(
                    EventCategory::WithdrawalCheck,
                    format!("withdrawal of {} is possible", amount),
                );
                WithdrawalCheck::Possible { notes }
            }
            None => {
                let available = self.inventory.available_notes();
                let listed = if available.is_empty() {
                    "none".to_string()
                } else {
                    available.format_notes()
                };
                self.log(
                    EventCategory::WithdrawalCheck,
                    format!(
                        "withdrawal of {} is not possible with the notes in this till; available: {}",
                        amount, listed
                    ),
                );
                WithdrawalCheck::Impossible { available }
            }
        };

        debug!(amount = %amount, possible = check.is_possible(), "Withdrawal checked");
        Ok(check)
    }

    /// Appends an entry to the journal, stamped by the till's clock.
    pub fn log(&mut self, category: EventCategory, message: impl Into<String>) {
        self.journal.append(self.clock.as_ref(), category, message);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denomination::Denomination;
    use crate::error::CoreError;
    use crate::journal::FixedClock;
    use chrono::{TimeZone, Utc};

    fn test_till() -> Till {
        Till::with_clock(
            DenominationSet::standard(),
            FixedClock::at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
        )
    }

    fn bundle(pairs: &[(u32, u32)]) -> NoteBundle {
        NoteBundle::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn d(v: u32) -> Denomination {
        Denomination::new(v).unwrap()
    }

    #[test]
    fn test_deposit_then_withdraw_260() {
        let mut till = test_till();
        till.deposit(&bundle(&[(200, 1), (50, 2), (10, 3)])).unwrap();
        assert_eq!(till.balance(), Amount::new(330));

        let outcome = till.withdraw(Amount::new(260)).unwrap();
        assert_eq!(
            outcome,
            WithdrawalOutcome::Dispensed {
                notes: bundle(&[(200, 1), (50, 1), (10, 1)])
            }
        );
        assert_eq!(till.balance(), Amount::new(70));
    }

    #[test]
    fn test_withdraw_more_than_balance_is_declined() {
        let mut till = test_till();
        till.deposit(&bundle(&[(200, 1), (50, 2), (10, 3)])).unwrap();
        till.withdraw(Amount::new(260)).unwrap();

        let before = till.inventory().clone();
        let outcome = till.withdraw(Amount::new(120)).unwrap();

        assert_eq!(
            outcome,
            WithdrawalOutcome::Declined {
                requested: Amount::new(120)
            }
        );
        assert_eq!(till.inventory(), &before);
        assert_eq!(till.inventory().count(d(50)), Some(1));
        assert_eq!(till.inventory().count(d(10)), Some(2));
    }

    #[test]
    fn test_withdraw_uses_only_available_denomination() {
        let mut till = test_till();
        till.deposit(&bundle(&[(20, 3)])).unwrap();

        let outcome = till.withdraw(Amount::new(60)).unwrap();
        assert_eq!(outcome.into_notes(), Some(bundle(&[(20, 3)])));
        assert!(till.inventory().is_empty());
    }

    #[test]
    fn test_withdraw_follows_greedy_order() {
        let mut till = test_till();
        till.deposit(&bundle(&[(50, 1), (20, 1), (10, 1)])).unwrap();

        let outcome = till.withdraw(Amount::new(60)).unwrap();
        assert_eq!(outcome.notes(), Some(&bundle(&[(50, 1), (10, 1)])));
        assert_eq!(till.inventory().count(d(20)), Some(1));
    }

    #[test]
    fn test_greedy_declines_when_exact_combination_exists() {
        let mut till = test_till();
        till.deposit(&bundle(&[(50, 1), (20, 3)])).unwrap();
        let before = till.inventory().clone();

        // 3x 20 would work, but the 50 is taken first and leaves 10.
        let outcome = till.withdraw(Amount::new(60)).unwrap();
        assert!(!outcome.is_dispensed());
        assert_eq!(till.inventory(), &before);
    }

    #[test]
    fn test_withdraw_empties_then_declines() {
        let mut till = test_till();
        till.deposit(&bundle(&[(200, 1)])).unwrap();

        let first = till.withdraw(Amount::new(200)).unwrap();
        assert_eq!(first.notes(), Some(&bundle(&[(200, 1)])));
        assert_eq!(till.balance(), Amount::zero());

        let second = till.withdraw(Amount::new(200)).unwrap();
        assert!(!second.is_dispensed());
        assert_eq!(till.balance(), Amount::zero());
    }

    #[test]
    fn test_withdraw_zero_is_rejected() {
        let mut till = test_till();
        till.deposit(&bundle(&[(10, 1)])).unwrap();

        let err = till.withdraw(Amount::zero()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::MustBePositive { .. })));
        assert_eq!(till.journal().len(), 1);
    }

    #[test]
    fn test_withdrawals_conserve_value() {
        let mut base = test_till();
        base.deposit(&bundle(&[
            (200, 2),
            (100, 1),
            (50, 3),
            (20, 4),
            (10, 2),
            (5, 1),
            (2, 5),
        ]))
        .unwrap();

        for requested in 1..=base.balance().value() + 10 {
            let amount = Amount::new(requested);
            let before = base.inventory().clone();
            let before_balance = base.balance();

            let mut inventory = before.clone();
            match plan_withdrawal(&inventory, amount) {
                Some(notes) => {
                    assert_eq!(notes.total(), amount);
                    inventory.debit(&notes);
                    assert_eq!(inventory.balance(), before_balance - amount);
                    assert!(notes
                        .iter()
                        .all(|(d, c)| c <= before.count(d).unwrap()));
                }
                None => assert_eq!(inventory, before),
            }
        }
    }

    #[test]
    fn test_withdraw_is_deterministic() {
        let mut a = test_till();
        let mut b = test_till();
        let notes = bundle(&[(100, 2), (20, 5), (5, 3), (2, 4)]);
        a.deposit(&notes).unwrap();
        b.deposit(&notes).unwrap();

        for requested in [7, 125, 236, 999, 48] {
            let amount = Amount::new(requested);
            assert_eq!(a.withdraw(amount).unwrap(), b.withdraw(amount).unwrap());
            assert_eq!(a.inventory(), b.inventory());
        }
    }

    #[test]
    fn test_deposit_unknown_denomination_is_rejected() {
        let mut till = test_till();
        till.deposit(&bundle(&[(10, 1)])).unwrap();

        let err = till.deposit(&bundle(&[(50, 1), (3, 1)])).unwrap_err();
        assert!(matches!(err, CoreError::UnknownDenomination { .. }));
        assert_eq!(till.balance(), Amount::new(10));
        assert_eq!(till.journal().len(), 1);
    }

    #[test]
    fn test_deposit_empty_is_rejected() {
        let mut till = test_till();
        let err = till.deposit(&NoteBundle::new()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Required { .. })));
        assert!(till.journal().is_empty());
    }

    #[test]
    fn test_journal_records_each_operation() {
        let mut till = test_till();
        till.deposit(&bundle(&[(200, 1), (50, 1), (10, 3)])).unwrap();
        till.withdraw(Amount::new(260)).unwrap();
        till.withdraw(Amount::new(120)).unwrap();

        let lines: Vec<String> = till
            .journal()
            .entries()
            .iter()
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            lines,
            vec![
                "[2024-05-01 09:30:00] deposit completed: 1x 200, 1x 50, 3x 10",
                "[2024-05-01 09:30:00] withdrawal completed: 260 -> 1x 200, 1x 50, 1x 10",
                "[2024-05-01 09:30:00] withdrawal failed: unable to assemble 120 from the notes available",
            ]
        );
    }

    #[test]
    fn test_check_withdrawal_does_not_dispense() {
        let mut till = test_till();
        till.deposit(&bundle(&[(200, 1), (50, 1), (10, 3)])).unwrap();

        let check = till.check_withdrawal(Amount::new(200)).unwrap();
        assert_eq!(
            check,
            WithdrawalCheck::Possible {
                notes: bundle(&[(200, 1)])
            }
        );
        assert_eq!(till.balance(), Amount::new(280));
        assert_eq!(
            till.journal().last().unwrap().message,
            "withdrawal of 200 is possible"
        );
    }

    #[test]
    fn test_check_withdrawal_lists_available_notes() {
        let mut till = test_till();
        till.deposit(&bundle(&[(10, 2)])).unwrap();

        let check = till.check_withdrawal(Amount::new(120)).unwrap();
        assert_eq!(
            check,
            WithdrawalCheck::Impossible {
                available: bundle(&[(10, 2)])
            }
        );
        let entry = till.journal().last().unwrap();
        assert_eq!(entry.category, EventCategory::WithdrawalCheck);
        assert_eq!(
            entry.message,
            "withdrawal of 120 is not possible with the notes in this till; available: 2x 10"
        );
    }

    #[test]
    fn test_check_withdrawal_on_empty_till() {
        let mut till = test_till();
        let check = till.check_withdrawal(Amount::new(10)).unwrap();
        assert!(!check.is_possible());
        assert!(till.journal().last().unwrap().message.ends_with("available: none"));
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = WithdrawalOutcome::Declined {
            requested: Amount::new(120),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"declined","requested":120}"#);
    }
}
