//! Error types for the ledger engine
//!
//! This module defines all error types that can occur while mutating the
//! account set. The taxonomy follows the call path:
//!
//! - **Validation errors**: raised synchronously before any network call,
//!   shown inline; they never reach the remote authority.
//! - **InsufficientFunds**: transfer-specific fast-fail, also pre-network.
//! - **Remote errors**: any rejection from the Accounts API. The remote
//!   boundary carries a human-readable message only, no structured codes.
//! - **ConfirmationRequired**: the bulk-operation gate. Not a failure, a
//!   required user step.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection from the remote Accounts API
///
/// The remote boundary is message-only: network failures and server-side
/// refusals both arrive as a human-readable string. Remote errors are
/// surfaced once and never retried by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Remote error: {message}")]
pub struct RemoteError {
    /// Human-readable description from the transport or the server
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        RemoteError {
            message: message.into(),
        }
    }
}

/// Main error type for the ledger engine
///
/// Each variant includes enough context to produce a user-facing message
/// without further lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// One or more blocking validation failures
    ///
    /// Raised before any network call; carries every collected message,
    /// not just the first one.
    #[error("Validation failed: {}", messages.join("; "))]
    Validation {
        /// All blocking messages, in evaluation order
        messages: Vec<String>,
    },

    /// Source account cannot cover the requested transfer amount
    ///
    /// Pre-network fast-fail, deliberately redundant with the floor check
    /// inside transfer validation.
    #[error("Insufficient funds on account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Source account id
        account: String,
        /// Current balance of the source account
        balance: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// The Accounts API rejected a call
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A bulk operation was executed without passing the confirmation gate
    ///
    /// The operation is staged but not confirmed; the caller must confirm
    /// and resubmit. This is a required user step, not a failure mode.
    #[error("Bulk {operation} requires confirmation before executing")]
    ConfirmationRequired {
        /// The staged operation name
        operation: String,
    },

    /// No account with the given id exists in the store
    #[error("Account not found: {id}")]
    AccountNotFound {
        /// The id that was looked up
        id: String,
    },

    /// A bulk operation was staged with no accounts selected
    #[error("No accounts selected for bulk {operation}")]
    EmptySelection {
        /// The operation that was attempted
        operation: String,
    },

    /// Snapshot serialization failed during export
    #[error("Export failed: {message}")]
    Export {
        /// Description of the serialization failure
        message: String,
    },
}

impl LedgerError {
    /// Create a Validation error from collected messages
    pub fn validation(messages: Vec<String>) -> Self {
        LedgerError::Validation { messages }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create a ConfirmationRequired error
    pub fn confirmation_required(operation: &str) -> Self {
        LedgerError::ConfirmationRequired {
            operation: operation.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        LedgerError::AccountNotFound { id: id.to_string() }
    }

    /// Create an EmptySelection error
    pub fn empty_selection(operation: &str) -> Self {
        LedgerError::EmptySelection {
            operation: operation.to_string(),
        }
    }

    /// Create an Export error
    pub fn export(message: impl Into<String>) -> Self {
        LedgerError::Export {
            message: message.into(),
        }
    }
}
