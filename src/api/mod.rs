//! Remote Accounts API seam
//!
//! The ledger engine never owns account persistence: the remote authority
//! does. This module defines the async contract the engine consumes, plus
//! the backends that implement it (an in-memory one for tests and demo
//! mode, and a JSON-file one backing the CLI).
//!
//! Contract notes, binding for every implementation:
//! - `transfer` is atomic on the remote side for both legs.
//! - Rejections carry a human-readable message only; no structured error
//!   codes cross this boundary.
//! - Retry, cancellation, and timeouts live in the transport, not here.

use crate::types::{Account, AccountDraft, AccountId, AccountPatch, RemoteError};
use async_trait::async_trait;
use rust_decimal::Decimal;

pub mod file;
pub mod memory;

pub use file::JsonFileAccountsApi;
pub use memory::InMemoryAccountsApi;

/// The remote authority for the account set
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Fetch the full account list
    async fn list(&self) -> Result<Vec<Account>, RemoteError>;

    /// Create a new account from a draft
    async fn create(&self, draft: AccountDraft) -> Result<Account, RemoteError>;

    /// Apply a partial update to an existing account
    async fn update(&self, id: &AccountId, patch: AccountPatch) -> Result<Account, RemoteError>;

    /// Delete an account
    async fn delete(&self, id: &AccountId) -> Result<(), RemoteError>;

    /// Move `amount` between two accounts, atomically for both legs
    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<(), RemoteError>;

    /// Set an account's balance to `new_balance`, recording the reason
    async fn adjust_balance(
        &self,
        id: &AccountId,
        new_balance: Decimal,
        reason: &str,
    ) -> Result<Account, RemoteError>;
}

// Shared handles delegate, so a caller can keep a handle to the backend
// it hands the engine (tests use this to observe remote state drift).
#[async_trait]
impl<T: AccountsApi + ?Sized> AccountsApi for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<Account>, RemoteError> {
        (**self).list().await
    }

    async fn create(&self, draft: AccountDraft) -> Result<Account, RemoteError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &AccountId, patch: AccountPatch) -> Result<Account, RemoteError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &AccountId) -> Result<(), RemoteError> {
        (**self).delete(id).await
    }

    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<(), RemoteError> {
        (**self).transfer(from, to, amount, description).await
    }

    async fn adjust_balance(
        &self,
        id: &AccountId,
        new_balance: Decimal,
        reason: &str,
    ) -> Result<Account, RemoteError> {
        (**self).adjust_balance(id, new_balance, reason).await
    }
}
