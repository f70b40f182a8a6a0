//! Activity log
//!
//! Append-only, client-local audit trail of completed mutations. New
//! entries are prepended so the feed reads most-recent-first. The log is
//! memory-resident: it resets on process restart and no external
//! interface persists it.
//!
//! Ids come from the log's own monotonic counter, so entries created in
//! the same instant still get distinct ids.

use crate::types::{ActivityEntry, ActivityId, ActivityKind};
use chrono::Utc;
use rust_decimal::Decimal;

/// In-memory, newest-first activity feed
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
    next_id: ActivityId,
}

impl ActivityLog {
    /// Create an empty log
    pub fn new() -> Self {
        ActivityLog::default()
    }

    /// Record a completed mutation
    ///
    /// Returns the id assigned to the new entry. The entry is prepended:
    /// index 0 is always the most recent record.
    pub fn record(
        &mut self,
        kind: ActivityKind,
        description: impl Into<String>,
        amount: Option<Decimal>,
        color: impl Into<String>,
    ) -> ActivityId {
        self.next_id += 1;
        let entry = ActivityEntry {
            id: self.next_id,
            kind,
            timestamp: Utc::now(),
            description: description.into(),
            amount,
            color: color.into(),
        };
        self.entries.insert(0, entry);
        self.next_id
    }

    /// All entries, most recent first
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Redact a single entry from the local feed
    ///
    /// Purely presentational: the mutation the entry recorded is not
    /// undone, and the removal cannot be reverted within the session.
    /// Returns whether an entry with that id existed.
    pub fn remove(&mut self, id: ActivityId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_newest_first() {
        let mut log = ActivityLog::new();
        log.record(ActivityKind::AccountCreated, "first", None, "#888");
        log.record(ActivityKind::Transfer, "second", Some(Decimal::new(10, 0)), "#888");

        assert_eq!(log.entries()[0].description, "second");
        assert_eq!(log.entries()[1].description, "first");
    }

    #[test]
    fn test_ids_are_distinct_and_increasing() {
        let mut log = ActivityLog::new();
        let a = log.record(ActivityKind::Transfer, "a", None, "#888");
        let b = log.record(ActivityKind::Transfer, "b", None, "#888");
        let c = log.record(ActivityKind::Transfer, "c", None, "#888");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_remove_is_local_redaction_only() {
        let mut log = ActivityLog::new();
        let id = log.record(ActivityKind::BalanceIncrease, "fix", None, "#888");
        log.record(ActivityKind::Transfer, "move", None, "#888");

        assert!(log.remove(id));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].description, "move");

        // Removing again reports that nothing matched.
        assert!(!log.remove(id));
    }
}
