//! Ephemeral operation payloads
//!
//! Transfers and balance adjustments are not stored as entities: each one
//! produces account mutations and an activity entry, then disappears.

use super::account::AccountId;
use rust_decimal::Decimal;

/// A requested money movement between two accounts
///
/// Produces exactly two balance deltas (`-amount` on the source,
/// `+amount` on the destination) and one activity entry. Conservation
/// invariant: the combined balance of the two accounts is unchanged.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Source account id
    pub from: AccountId,

    /// Destination account id
    pub to: AccountId,

    /// Amount to move, must be strictly positive
    pub amount: Decimal,

    /// Optional free-text note carried into the activity entry
    pub description: Option<String>,
}

/// A manual single-account balance correction
///
/// The reason is required and non-empty; the resulting activity entry is
/// tagged by the sign of `new_balance - old_balance` and carries the
/// absolute difference as its amount.
#[derive(Debug, Clone)]
pub struct BalanceAdjustment {
    /// Account to correct
    pub account: AccountId,

    /// Balance the account should end up with
    pub new_balance: Decimal,

    /// Required justification, recorded in the activity log
    pub reason: String,
}
