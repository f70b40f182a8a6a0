//! In-memory Accounts API backend
//!
//! Reference implementation of [`AccountsApi`] backed by a plain map.
//! Used as the demo-mode backend and throughout the test suite, where its
//! per-id failure injection makes partial-failure scenarios deterministic:
//! mark an id as failing and every mutating call touching it is rejected
//! with a remote error, exactly as a flaky authority would.

use super::AccountsApi;
use crate::types::{Account, AccountDraft, AccountId, AccountPatch, RemoteError};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Map-backed account authority with scriptable failures
#[derive(Default)]
pub struct InMemoryAccountsApi {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    /// Ids whose mutating calls are rejected
    failing: HashSet<AccountId>,
    /// When set, every mutating call is rejected
    offline: bool,
    next_id: u64,
}

impl InMemoryAccountsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with an initial account set
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let api = Self::new();
        {
            let mut inner = api.inner.lock().unwrap();
            inner.next_id = accounts.len() as u64 + 1;
            inner.accounts = accounts.into_iter().map(|a| (a.id.clone(), a)).collect();
        }
        api
    }

    /// Reject every future mutating call that references `id`
    pub fn fail_on(&self, id: &AccountId) {
        self.inner.lock().unwrap().failing.insert(id.clone());
    }

    /// Reject every future mutating call regardless of id
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().unwrap().offline = offline;
    }

    fn check_reachable(inner: &Inner, ids: &[&AccountId]) -> Result<(), RemoteError> {
        if inner.offline {
            return Err(RemoteError::new("Service unavailable"));
        }
        for id in ids {
            if inner.failing.contains(*id) {
                return Err(RemoteError::new(format!("Server rejected update to {}", id)));
            }
        }
        Ok(())
    }

    fn get(inner: &Inner, id: &AccountId) -> Result<Account, RemoteError> {
        inner
            .accounts
            .get(id)
            .cloned()
            .ok_or_else(|| RemoteError::new(format!("Unknown account {}", id)))
    }
}

#[async_trait]
impl AccountsApi for InMemoryAccountsApi {
    async fn list(&self) -> Result<Vec<Account>, RemoteError> {
        let inner = self.inner.lock().unwrap();
        if inner.offline {
            return Err(RemoteError::new("Service unavailable"));
        }
        let mut accounts: Vec<Account> = inner.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    async fn create(&self, draft: AccountDraft) -> Result<Account, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_reachable(&inner, &[])?;

        inner.next_id += 1;
        let id = format!("acc-{}", inner.next_id);
        let account = Account {
            id: id.clone(),
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
        inner.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn update(&self, id: &AccountId, patch: AccountPatch) -> Result<Account, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_reachable(&inner, &[id])?;

        let mut account = Self::get(&inner, id)?;
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
        inner.accounts.insert(id.clone(), account.clone());
        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_reachable(&inner, &[id])?;

        inner
            .accounts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RemoteError::new(format!("Unknown account {}", id)))
    }

    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
        _description: Option<&str>,
    ) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_reachable(&inner, &[from, to])?;

        // Validate both legs before touching either, so the remote side
        // stays atomic.
        let mut source = Self::get(&inner, from)?;
        let mut destination = Self::get(&inner, to)?;

        source.balance -= amount;
        source.last_transaction = Some(Utc::now());
        destination.balance += amount;
        destination.last_transaction = Some(Utc::now());

        inner.accounts.insert(from.clone(), source);
        inner.accounts.insert(to.clone(), destination);
        Ok(())
    }

    async fn adjust_balance(
        &self,
        id: &AccountId,
        new_balance: Decimal,
        _reason: &str,
    ) -> Result<Account, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_reachable(&inner, &[id])?;

        let mut account = Self::get(&inner, id)?;
        account.balance = new_balance;
        account.last_transaction = Some(Utc::now());
        inner.accounts.insert(id.clone(), account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountKind;

    fn draft(name: &str) -> AccountDraft {
        AccountDraft {
            name: name.to_string(),
            kind: AccountKind::Checking,
            balance: Decimal::new(100, 0),
            currency: "EUR".to_string(),
            color: "#3b82f6".to_string(),
            bank: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let api = InMemoryAccountsApi::new();
        let created = api.create(draft("Main")).await.unwrap();
        let listed = api.list().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_transfer_moves_both_legs() {
        let api = InMemoryAccountsApi::new();
        let a = api.create(draft("A")).await.unwrap();
        let b = api.create(draft("B")).await.unwrap();

        api.transfer(&a.id, &b.id, Decimal::new(40, 0), None)
            .await
            .unwrap();

        let accounts = api.list().await.unwrap();
        assert_eq!(accounts[0].balance, Decimal::new(60, 0));
        assert_eq!(accounts[1].balance, Decimal::new(140, 0));
    }

    #[tokio::test]
    async fn test_failing_id_rejects_mutations() {
        let api = InMemoryAccountsApi::new();
        let a = api.create(draft("A")).await.unwrap();
        api.fail_on(&a.id);

        let result = api.delete(&a.id).await;
        assert!(result.is_err());
        assert_eq!(api.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_offline_rejects_everything() {
        let api = InMemoryAccountsApi::new();
        api.set_offline(true);
        assert!(api.list().await.is_err());
        assert!(api.create(draft("A")).await.is_err());
    }
}
