//! # Journal
//!
//! The till's own event log: an append-only, in-memory list of
//! human-readable records, one per operation.
//!
//! ## Entry Shape
//! ```text
//! [2024-05-01 09:30:00] withdrawal completed: 260 -> 1x 200, 1x 50, 1x 10
//!  └──── timestamp ────┘ └──── category ────┘  └──────── message ────────┘
//! ```
//!
//! The journal never truncates and never writes anywhere. Shipping it to a
//! console, file or collector is the caller's job.
//!
//! ## Time
//! Timestamps come from an injected [`Clock`], so tests can pin them with
//! [`FixedClock`] while production uses [`SystemClock`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// chrono format used by `Display` for entries.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Clock
// =============================================================================

/// Source of journal timestamps.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        FixedClock(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Event Category
// =============================================================================

/// What kind of operation produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Notes were added to the till.
    DepositCompleted,
    /// Notes were dispensed.
    WithdrawalCompleted,
    /// A withdrawal could not be assembled; nothing was dispensed.
    WithdrawalFailed,
    /// A dry-run check of whether an amount could be dispensed.
    WithdrawalCheck,
}

impl EventCategory {
    /// Label used in rendered entries.
    pub const fn label(&self) -> &'static str {
        match self {
            EventCategory::DepositCompleted => "deposit completed",
            EventCategory::WithdrawalCompleted => "withdrawal completed",
            EventCategory::WithdrawalFailed => "withdrawal failed",
            EventCategory::WithdrawalCheck => "withdrawal check",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Log Entry
// =============================================================================

/// A single journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Position in the journal, starting at 1.
    pub sequence: u64,

    /// When the entry was appended (from the till's clock).
    pub timestamp: DateTime<Utc>,

    pub category: EventCategory,

    pub message: String,
}

impl LogEntry {
    /// Renders `[<timestamp>] <category>: <message>` with a chrono
    /// `strftime`-style timestamp format.
    pub fn render(&self, timestamp_format: &str) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format(timestamp_format),
            self.category,
            self.message
        )
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_TIMESTAMP_FORMAT))
    }
}

// =============================================================================
// Journal
// =============================================================================

/// Append-only sequence of log entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Journal {
    entries: Vec<LogEntry>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Journal::default()
    }

    /// Appends an entry stamped by `clock` and returns it.
    pub fn append(
        &mut self,
        clock: &dyn Clock,
        category: EventCategory,
        message: impl Into<String>,
    ) -> &LogEntry {
        let entry = LogEntry {
            sequence: self.entries.len() as u64 + 1,
            timestamp: clock.now(),
            category,
            message: message.into(),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders every entry, one per line, oldest first.
    pub fn render(&self, timestamp_format: &str) -> String {
        self.entries
            .iter()
            .map(|e| e.render(timestamp_format))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> FixedClock {
        FixedClock::at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_new_journal_is_empty() {
        let journal = Journal::new();
        assert!(journal.is_empty());
        assert!(journal.last().is_none());
        assert_eq!(journal.render(DEFAULT_TIMESTAMP_FORMAT), "");
    }

    #[test]
    fn test_append_numbers_entries() {
        let mut journal = Journal::new();
        let clock = clock();

        journal.append(&clock, EventCategory::DepositCompleted, "1x 200");
        journal.append(&clock, EventCategory::WithdrawalFailed, "120");

        assert_eq!(journal.len(), 2);
        assert_eq!(journal.entries()[0].sequence, 1);
        assert_eq!(journal.entries()[1].sequence, 2);
        assert_eq!(journal.last().unwrap().category, EventCategory::WithdrawalFailed);
    }

    #[test]
    fn test_entry_display() {
        let mut journal = Journal::new();
        let entry = journal
            .append(&clock(), EventCategory::DepositCompleted, "1x 200, 3x 10")
            .clone();

        assert_eq!(
            entry.to_string(),
            "[2024-05-01 09:30:00] deposit completed: 1x 200, 3x 10"
        );
        assert_eq!(
            entry.render("%d/%m/%Y"),
            "[01/05/2024] deposit completed: 1x 200, 3x 10"
        );
    }

    #[test]
    fn test_render_joins_lines() {
        let mut journal = Journal::new();
        let clock = clock();
        journal.append(&clock, EventCategory::WithdrawalCheck, "a");
        journal.append(&clock, EventCategory::WithdrawalCompleted, "b");

        assert_eq!(
            journal.render("%H:%M"),
            "[09:30] withdrawal check: a\n[09:30] withdrawal completed: b"
        );
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&EventCategory::WithdrawalFailed).unwrap();
        assert_eq!(json, r#""withdrawal_failed""#);
    }
}
