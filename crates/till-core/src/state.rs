//! # Shared Till
//!
//! A cloneable handle for callers that need one till from several threads.
//!
//! ## Thread Safety
//! The till is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several callers may hold a handle at once
//! 2. A withdrawal plans against the counts and then commits that plan;
//!    nothing may deposit or withdraw in between
//! 3. Each closure below runs under a single lock acquisition, so a whole
//!    operation is one critical section
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  thread A: with_till_mut(|t| t.withdraw(260)) ──┐                       │
//! │                                                 ├──► Mutex<Till>        │
//! │  thread B: with_till_mut(|t| t.deposit(..)) ────┘    (one at a time)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use crate::amount::Amount;
use crate::bundle::NoteBundle;
use crate::error::CoreResult;
use crate::journal::Journal;
use crate::till::{Till, WithdrawalCheck, WithdrawalOutcome};

/// Cloneable, thread-safe handle to one till.
#[derive(Debug, Clone)]
pub struct SharedTill {
    till: Arc<Mutex<Till>>,
}

impl SharedTill {
    pub fn new(till: Till) -> Self {
        SharedTill {
            till: Arc::new(Mutex::new(till)),
        }
    }

    /// Executes a function with read access to the till.
    ///
    /// ## Usage
    /// ```rust
    /// use till_core::{DenominationSet, SharedTill, Till};
    ///
    /// let shared = SharedTill::new(Till::new(DenominationSet::standard()));
    /// let balance = shared.with_till(|till| till.balance());
    /// assert!(balance.is_zero());
    /// ```
    pub fn with_till<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Till) -> R,
    {
        let till = self.till.lock().expect("Till mutex poisoned");
        f(&till)
    }

    /// Executes a function with write access to the till.
    pub fn with_till_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Till) -> R,
    {
        let mut till = self.till.lock().expect("Till mutex poisoned");
        f(&mut till)
    }

    pub fn balance(&self) -> Amount {
        self.with_till(|till| till.balance())
    }

    pub fn deposit(&self, bundle: &NoteBundle) -> CoreResult<()> {
        self.with_till_mut(|till| till.deposit(bundle))
    }

    pub fn withdraw(&self, amount: Amount) -> CoreResult<WithdrawalOutcome> {
        self.with_till_mut(|till| till.withdraw(amount))
    }

    /// Journals whether `amount` could be dispensed; counts are untouched.
    pub fn check_withdrawal(&self, amount: Amount) -> CoreResult<WithdrawalCheck> {
        self.with_till_mut(|till| till.check_withdrawal(amount))
    }

    /// Snapshot of the journal at the time of the call.
    pub fn journal(&self) -> Journal {
        self.with_till(|till| till.journal().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denomination::DenominationSet;
    use crate::journal::EventCategory;
    use std::thread;

    #[test]
    fn test_handles_share_one_till() {
        let shared = SharedTill::new(Till::new(DenominationSet::standard()));
        let other = shared.clone();

        other
            .deposit(&NoteBundle::from_pairs([(100, 2)]).unwrap())
            .unwrap();

        assert_eq!(shared.balance(), Amount::new(200));
    }

    #[test]
    fn test_concurrent_withdrawals_never_overdraw() {
        let shared = SharedTill::new(Till::new(DenominationSet::standard()));
        shared
            .deposit(&NoteBundle::from_pairs([(10, 50)]).unwrap())
            .unwrap();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = shared.clone();
                thread::spawn(move || {
                    (0..10)
                        .filter(|_| handle.withdraw(Amount::new(10)).unwrap().is_dispensed())
                        .count()
                })
            })
            .collect();

        let dispensed: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();

        // 80 requests for 10 against 50 notes of 10.
        assert_eq!(dispensed, 50);
        assert_eq!(shared.balance(), Amount::zero());
        assert_eq!(shared.with_till(|till| till.journal().len()), 81);
    }

    #[test]
    fn test_check_and_journal_through_handle() {
        let shared = SharedTill::new(Till::new(DenominationSet::standard()));
        shared
            .deposit(&NoteBundle::from_pairs([(50, 1), (10, 2)]).unwrap())
            .unwrap();

        assert!(shared.check_withdrawal(Amount::new(60)).unwrap().is_possible());
        assert!(!shared.check_withdrawal(Amount::new(80)).unwrap().is_possible());
        assert_eq!(shared.balance(), Amount::new(70));

        let snapshot = shared.journal();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.last().unwrap().category, EventCategory::WithdrawalCheck);

        shared.withdraw(Amount::new(10)).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(shared.journal().len(), 4);
    }
}
