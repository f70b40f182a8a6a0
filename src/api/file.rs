//! JSON-file Accounts API backend
//!
//! Persists the account set as a single JSON document on disk, read and
//! rewritten around every call via `tokio::fs`. This is the authority the
//! CLI talks to; like any remote backend it only reports failures as
//! human-readable messages.
//!
//! Assumes a single logical writer (the engine's model); concurrent
//! processes sharing one ledger file are not supported.

use super::AccountsApi;
use crate::types::{Account, AccountDraft, AccountId, AccountPatch, RemoteError};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk document layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerDocument {
    accounts: Vec<Account>,
    next_id: u64,
}

/// File-backed account authority
pub struct JsonFileAccountsApi {
    path: PathBuf,
}

impl JsonFileAccountsApi {
    /// Open (or lazily create) the ledger file at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileAccountsApi {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<LedgerDocument, RemoteError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RemoteError::new(format!("Ledger file is corrupt: {}", e))),
            // A missing file is an empty ledger, created on first write.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerDocument::default()),
            Err(e) => Err(RemoteError::new(format!("Cannot read ledger file: {}", e))),
        }
    }

    async fn persist(&self, doc: &LedgerDocument) -> Result<(), RemoteError> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| RemoteError::new(format!("Cannot encode ledger file: {}", e)))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| RemoteError::new(format!("Cannot write ledger file: {}", e)))
    }

    fn find_mut<'a>(
        doc: &'a mut LedgerDocument,
        id: &AccountId,
    ) -> Result<&'a mut Account, RemoteError> {
        doc.accounts
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| RemoteError::new(format!("Unknown account {}", id)))
    }
}

#[async_trait]
impl AccountsApi for JsonFileAccountsApi {
    async fn list(&self) -> Result<Vec<Account>, RemoteError> {
        Ok(self.load().await?.accounts)
    }

    async fn create(&self, draft: AccountDraft) -> Result<Account, RemoteError> {
        let mut doc = self.load().await?;
        doc.next_id += 1;
        let account = Account {
            id: format!("acc-{}", doc.next_id),
            name: draft.name,
            kind: draft.kind,
            balance: draft.balance,
            currency: draft.currency,
            color: draft.color,
            bank: draft.bank,
            is_active: true,
            created_at: Utc::now(),
            last_transaction: None,
        };
        doc.accounts.push(account.clone());
        self.persist(&doc).await?;
        Ok(account)
    }

    async fn update(&self, id: &AccountId, patch: AccountPatch) -> Result<Account, RemoteError> {
        let mut doc = self.load().await?;
        let account = Self::find_mut(&mut doc, id)?;
        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(color) = patch.color {
            account.color = color;
        }
        if let Some(bank) = patch.bank {
            account.bank = Some(bank);
        }
        if let Some(is_active) = patch.is_active {
            account.is_active = is_active;
        }
        let updated = account.clone();
        self.persist(&doc).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), RemoteError> {
        let mut doc = self.load().await?;
        let before = doc.accounts.len();
        doc.accounts.retain(|a| a.id != *id);
        if doc.accounts.len() == before {
            return Err(RemoteError::new(format!("Unknown account {}", id)));
        }
        self.persist(&doc).await
    }

    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
        _description: Option<&str>,
    ) -> Result<(), RemoteError> {
        let mut doc = self.load().await?;

        // Resolve both legs before mutating either; the write below lands
        // as one document, so both legs are atomic on this side.
        Self::find_mut(&mut doc, from)?;
        Self::find_mut(&mut doc, to)?;

        let now = Utc::now();
        {
            let source = Self::find_mut(&mut doc, from)?;
            source.balance -= amount;
            source.last_transaction = Some(now);
        }
        {
            let destination = Self::find_mut(&mut doc, to)?;
            destination.balance += amount;
            destination.last_transaction = Some(now);
        }

        self.persist(&doc).await
    }

    async fn adjust_balance(
        &self,
        id: &AccountId,
        new_balance: Decimal,
        _reason: &str,
    ) -> Result<Account, RemoteError> {
        let mut doc = self.load().await?;
        let account = Self::find_mut(&mut doc, id)?;
        account.balance = new_balance;
        account.last_transaction = Some(Utc::now());
        let updated = account.clone();
        self.persist(&doc).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountKind;
    use tempfile::tempdir;

    fn draft(name: &str, balance: i64) -> AccountDraft {
        AccountDraft {
            name: name.to_string(),
            kind: AccountKind::Checking,
            balance: Decimal::new(balance, 0),
            currency: "EUR".to_string(),
            color: "#3b82f6".to_string(),
            bank: Some("Test Bank".to_string()),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty_ledger() {
        let dir = tempdir().unwrap();
        let api = JsonFileAccountsApi::new(dir.path().join("ledger.json"));
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let api = JsonFileAccountsApi::new(&path);
        let created = api.create(draft("Main", 100)).await.unwrap();

        let reopened = JsonFileAccountsApi::new(&path);
        let listed = reopened.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].bank.as_deref(), Some("Test Bank"));
    }

    #[tokio::test]
    async fn test_transfer_and_adjust_round_trip() {
        let dir = tempdir().unwrap();
        let api = JsonFileAccountsApi::new(dir.path().join("ledger.json"));

        let a = api.create(draft("A", 100)).await.unwrap();
        let b = api.create(draft("B", 0)).await.unwrap();

        api.transfer(&a.id, &b.id, Decimal::new(30, 0), Some("rent"))
            .await
            .unwrap();
        let adjusted = api
            .adjust_balance(&b.id, Decimal::new(50, 0), "correction")
            .await
            .unwrap();

        assert_eq!(adjusted.balance, Decimal::new(50, 0));
        let accounts = api.list().await.unwrap();
        assert_eq!(accounts[0].balance, Decimal::new(70, 0));
        assert!(accounts[0].last_transaction.is_some());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_remote_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let api = JsonFileAccountsApi::new(&path);
        let err = api.list().await.unwrap_err();
        assert!(err.message.contains("corrupt"));
    }
}
