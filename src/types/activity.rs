//! Activity log entry types
//!
//! Entries record completed mutations for display in the dashboard feed.
//! The kind is a closed enum resolved to presentation assets outside this
//! crate; no UI component references live here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monotonic activity entry identifier
///
/// Assigned by the log's own counter, so two entries created in the same
/// instant still get distinct ids.
pub type ActivityId = u64;

/// Closed set of recordable activity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Money moved between two accounts
    Transfer,

    /// Manual correction that raised a balance
    BalanceIncrease,

    /// Manual correction that lowered a balance
    BalanceDecrease,

    /// A new account was created
    AccountCreated,

    /// An existing account was updated
    AccountUpdated,

    /// One or more accounts were deleted
    AccountDeleted,

    /// A bulk color change was applied
    BulkColorChange,

    /// A snapshot of selected accounts was exported
    Export,
}

impl ActivityKind {
    /// Default feed color for this kind of entry
    pub fn default_color(&self) -> &'static str {
        match self {
            ActivityKind::Transfer => "#3b82f6",
            ActivityKind::BalanceIncrease => "#16a34a",
            ActivityKind::BalanceDecrease => "#dc2626",
            ActivityKind::AccountCreated => "#16a34a",
            ActivityKind::AccountUpdated => "#f59e0b",
            ActivityKind::AccountDeleted => "#dc2626",
            ActivityKind::BulkColorChange => "#8b5cf6",
            ActivityKind::Export => "#6b7280",
        }
    }
}

/// One immutable record in the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Log-assigned monotonic id
    pub id: ActivityId,

    /// What happened
    pub kind: ActivityKind,

    /// When the mutation completed
    pub timestamp: DateTime<Utc>,

    /// Human-readable summary for the feed
    pub description: String,

    /// Monetary amount involved, when one applies
    pub amount: Option<Decimal>,

    /// Presentation hint for the feed row
    pub color: String,
}
