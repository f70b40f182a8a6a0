//! Ledger Engine Library
//! # Overview
//!
//! Account ledger and transfer validation engine for a personal-finance
//! dashboard: keeps a set of monetary accounts consistent while
//! supporting inter-account transfers, manual balance corrections, and
//! staged multi-account batch mutations, synchronized against a remote
//! authority and recorded in a client-local audit trail.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, activity entries, errors)
//! - [`validation`] - Pure admissibility checks for names, balances, and
//!   transfers (including near-duplicate detection via edit distance)
//! - [`api`] - Async seam to the remote Accounts API, with in-memory and
//!   JSON-file backends
//! - [`store`] - Write-through in-memory cache of the account set
//! - [`engine`] - Orchestration: transfer and adjustment executors, the
//!   staged/confirmed bulk operation state machine, account CRUD
//! - [`activity`] - Append-only, client-local audit trail
//! - [`analytics`] - Cached, auto-refreshing read-only aggregate view
//! - [`io`] - JSON/CSV snapshot export
//! - [`cli`] - CLI argument parsing for the `ledger` binary
//!
//! # Consistency model
//!
//! Every mutation validates fully client-side, commits against the
//! remote authority, and applies locally only after remote success, so
//! the cache never runs ahead of the authority. Bulk delete (sequential)
//! and bulk color change (concurrent) deliberately weaken this at their
//! partial-failure points; see [`engine`] for the details.

// Module declarations
pub mod activity;
pub mod analytics;
pub mod api;
pub mod cli;
pub mod engine;
pub mod io;
pub mod store;
pub mod types;
pub mod validation;

pub use activity::ActivityLog;
pub use api::{AccountsApi, InMemoryAccountsApi, JsonFileAccountsApi};
pub use engine::{BulkOperation, BulkOutcome, LedgerEngine};
pub use io::ExportFormat;
pub use store::AccountStore;
pub use types::{
    Account, AccountDraft, AccountId, AccountKind, AccountPatch, ActivityEntry, ActivityKind,
    BalanceAdjustment, LedgerError, RemoteError, TransferRequest,
};
pub use validation::{
    check_duplicate_name, similarity, validate_account_balance, validate_account_name,
    validate_transfer, TransferLimits, ValidationResult,
};
