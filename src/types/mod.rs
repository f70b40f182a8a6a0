//! Types module
//!
//! Contains core data structures used throughout the engine.
//! This module organizes types into logical submodules:
//! - `account`: Account, account kinds, and API payloads
//! - `operation`: Ephemeral transfer and adjustment payloads
//! - `activity`: Activity log entry types
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod activity;
pub mod error;
pub mod operation;

pub use account::{Account, AccountDraft, AccountId, AccountKind, AccountPatch};
pub use activity::{ActivityEntry, ActivityId, ActivityKind};
pub use error::{LedgerError, RemoteError};
pub use operation::{BalanceAdjustment, TransferRequest};
