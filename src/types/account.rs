//! Account-related types for the ledger engine
//!
//! This module defines the Account structure, the closed set of account
//! kinds with their per-kind configuration, and the payloads used to
//! create and update accounts through the remote Accounts API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque, stable account identifier assigned by the remote authority
pub type AccountId = String;

/// Closed set of account kinds
///
/// Each kind carries its own balance floor: checking accounts may run an
/// overdraft down to -1000, every other kind must stay at or above zero.
/// The per-kind configuration is matched exhaustively, never looked up
/// in a dynamic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Everyday current account, overdraft permitted down to the floor
    Checking,

    /// Savings account, never negative
    Savings,

    /// Card account (credit or prepaid), never negative
    Card,

    /// Investment account, never negative
    Investment,

    /// Business account, never negative
    Business,

    /// Physical cash, never negative
    Cash,
}

impl AccountKind {
    /// Minimum permissible balance for this kind
    ///
    /// Every successful mutation must leave the account at or above this
    /// floor.
    pub fn min_balance(&self) -> Decimal {
        match self {
            AccountKind::Checking => Decimal::new(-1000, 0),
            AccountKind::Savings
            | AccountKind::Card
            | AccountKind::Investment
            | AccountKind::Business
            | AccountKind::Cash => Decimal::ZERO,
        }
    }

    /// Human-readable label for display and export
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
            AccountKind::Card => "Card",
            AccountKind::Investment => "Investment",
            AccountKind::Business => "Business",
            AccountKind::Cash => "Cash",
        }
    }
}

/// A monetary account as held in the local store
///
/// The canonical copy lives with the remote authority; this struct is the
/// write-through cached view. Invariant: `balance >= kind.min_balance()`
/// after every successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Identifier assigned by the remote authority
    pub id: AccountId,

    /// Display name, unique case-insensitively across the account set
    pub name: String,

    /// Account kind, determines the balance floor
    pub kind: AccountKind,

    /// Current balance as a two-decimal monetary value
    pub balance: Decimal,

    /// ISO 4217 currency code (e.g. "EUR")
    pub currency: String,

    /// Presentation hint only, not load-bearing
    pub color: String,

    /// Issuing bank or institution, if any
    pub bank: Option<String>,

    /// Whether the account participates in dashboards and totals
    pub is_active: bool,

    /// Creation timestamp from the remote authority
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent balance-affecting operation
    pub last_transaction: Option<DateTime<Utc>>,
}

/// Payload for creating a new account via the Accounts API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
    pub currency: String,
    pub color: String,
    pub bank: Option<String>,
}

/// Partial update for an existing account
///
/// Only the populated fields are applied; `None` leaves the remote value
/// untouched. Balance changes go through the transfer or adjustment
/// operations, never through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub bank: Option<String>,
    pub is_active: Option<bool>,
}

impl AccountPatch {
    /// A patch that only changes the display color
    pub fn color(color: impl Into<String>) -> Self {
        AccountPatch {
            color: Some(color.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::checking(AccountKind::Checking, Decimal::new(-1000, 0))]
    #[case::savings(AccountKind::Savings, Decimal::ZERO)]
    #[case::card(AccountKind::Card, Decimal::ZERO)]
    #[case::investment(AccountKind::Investment, Decimal::ZERO)]
    #[case::business(AccountKind::Business, Decimal::ZERO)]
    #[case::cash(AccountKind::Cash, Decimal::ZERO)]
    fn test_min_balance_per_kind(#[case] kind: AccountKind, #[case] expected: Decimal) {
        assert_eq!(kind.min_balance(), expected);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&AccountKind::Checking).unwrap();
        assert_eq!(json, "\"checking\"");
    }

    #[test]
    fn test_color_patch_leaves_other_fields_unset() {
        let patch = AccountPatch::color("#ff8800");
        assert_eq!(patch.color.as_deref(), Some("#ff8800"));
        assert!(patch.name.is_none());
        assert!(patch.bank.is_none());
        assert!(patch.is_active.is_none());
    }
}
