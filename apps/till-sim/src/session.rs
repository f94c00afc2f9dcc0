//! # Reference Session
//!
//! The scripted sequence the simulator plays against a till.
//!
//! ```text
//! deposit { 200: 1, 50: 1, 10: 3 }
//!      │
//!      ▼
//! check 200 ──► balance ──► withdraw 260 ──► balance ──► withdraw 120
//!                                                              │
//!                                                              ▼
//!                                                        check 120
//! ```

use std::io::Write;

use anyhow::Context;
use tracing::info;

use till_core::{Amount, NoteBundle, Till, WithdrawalOutcome};

use crate::config::SimConfig;

/// Notes loaded into the till before the first request.
pub const OPENING_DEPOSIT: [(u32, u32); 3] = [(200, 1), (50, 1), (10, 3)];

/// Plays the reference session, writing a console narrative to `out`.
pub fn run(till: &mut Till, config: &SimConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let opening = NoteBundle::from_pairs(OPENING_DEPOSIT)?;
    till.deposit(&opening)
        .context("opening deposit does not fit the configured denominations")?;
    writeln!(out, "Deposit completed: {}", config.format_notes(&opening))?;

    till.check_withdrawal(Amount::new(200))?;
    writeln!(out, "Withdrawal check for {} done.", config.format_currency(Amount::new(200)))?;

    writeln!(out, "Balance: {}", config.format_currency(till.balance()))?;
    report(till, config, Amount::new(260), out)?;

    writeln!(out, "Balance: {}", config.format_currency(till.balance()))?;
    report(till, config, Amount::new(120), out)?;

    till.check_withdrawal(Amount::new(120))?;
    writeln!(out, "Withdrawal check for {} done.", config.format_currency(Amount::new(120)))?;

    info!(
        balance = %till.balance(),
        entries = till.journal().len(),
        "Session finished"
    );
    Ok(())
}

fn report(
    till: &mut Till,
    config: &SimConfig,
    amount: Amount,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let requested = config.format_currency(amount);
    match till.withdraw(amount)? {
        WithdrawalOutcome::Dispensed { notes } => {
            writeln!(out, "Withdrawal of {}: {}", requested, config.format_notes(&notes))?;
        }
        WithdrawalOutcome::Declined { .. } => {
            writeln!(out, "Withdrawal of {}: not possible", requested)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use till_core::{DenominationSet, EventCategory, FixedClock};

    fn clock() -> FixedClock {
        FixedClock::at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_session_output() {
        let config = SimConfig::default();
        let mut till = Till::with_clock(DenominationSet::standard(), clock());
        let mut out = Vec::new();

        run(&mut till, &config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Deposit completed: 1x R$200, 1x R$50, 3x R$10",
                "Withdrawal check for R$200 done.",
                "Balance: R$280",
                "Withdrawal of R$260: 1x R$200, 1x R$50, 1x R$10",
                "Balance: R$20",
                "Withdrawal of R$120: not possible",
                "Withdrawal check for R$120 done.",
            ]
        );
    }

    #[test]
    fn test_session_journal() {
        let config = SimConfig::default();
        let mut till = Till::with_clock(DenominationSet::standard(), clock());
        run(&mut till, &config, &mut Vec::new()).unwrap();

        let categories: Vec<EventCategory> = till
            .journal()
            .entries()
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                EventCategory::DepositCompleted,
                EventCategory::WithdrawalCheck,
                EventCategory::WithdrawalCompleted,
                EventCategory::WithdrawalFailed,
                EventCategory::WithdrawalCheck,
            ]
        );
        assert_eq!(
            till.journal().last().unwrap().message,
            "withdrawal of 120 is not possible with the notes in this till; available: 2x 10"
        );

        let rendered = till.journal().render(&config.timestamp_format);
        assert_eq!(
            rendered.lines().next().unwrap(),
            "[2024-05-01 09:30:00] deposit completed: 1x 200, 1x 50, 3x 10"
        );
    }

    #[test]
    fn test_session_rejects_incompatible_denominations() {
        let config = SimConfig::default();
        let set = DenominationSet::new([100, 20]).unwrap();
        let mut till = Till::with_clock(set, clock());

        let err = run(&mut till, &config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("opening deposit"));
        assert!(till.journal().is_empty());
    }
}
