//! Account store
//!
//! Canonical in-memory view of the account set, loaded once from the
//! remote authority and thereafter mutated through a narrow cache API.
//! The store is write-through by construction: it exposes no operation
//! that talks to the network, and the engine only calls its mutators
//! *after* the corresponding remote call has succeeded. Local state
//! therefore never runs ahead of the authority.
//!
//! The store is an owned object injected into the engine, never a
//! free-floating global.

use crate::types::{Account, AccountId, AccountPatch};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// In-memory cache of the account set
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        AccountStore::default()
    }

    /// Replace the whole cached set, e.g. after the initial remote list
    pub fn replace_all(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    /// All cached accounts, in remote order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of cached accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account by id
    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == *id)
    }

    /// Look up an account by name, case-insensitively
    ///
    /// Unicode-aware, matching what duplicate validation considers the
    /// same name.
    pub fn get_by_name(&self, name: &str) -> Option<&Account> {
        let wanted = name.to_lowercase();
        self.accounts
            .iter()
            .find(|a| a.name.to_lowercase() == wanted)
    }

    /// Insert a newly created account
    pub fn insert(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Overwrite one cached account with its confirmed remote state
    pub fn upsert(&mut self, account: Account) {
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(slot) => *slot = account,
            None => self.accounts.push(account),
        }
    }

    /// Apply a confirmed patch to one cached account
    pub fn apply_patch(&mut self, id: &AccountId, patch: &AccountPatch) {
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == *id) {
            if let Some(name) = &patch.name {
                account.name = name.clone();
            }
            if let Some(color) = &patch.color {
                account.color = color.clone();
            }
            if let Some(bank) = &patch.bank {
                account.bank = Some(bank.clone());
            }
            if let Some(is_active) = patch.is_active {
                account.is_active = is_active;
            }
        }
    }

    /// Apply a confirmed transfer as one symmetric update
    ///
    /// Both deltas land in a single pass so no observer ever sees money
    /// removed from the source without it arriving at the destination.
    pub fn apply_transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
        at: DateTime<Utc>,
    ) {
        for account in self.accounts.iter_mut() {
            if account.id == *from {
                account.balance -= amount;
                account.last_transaction = Some(at);
            } else if account.id == *to {
                account.balance += amount;
                account.last_transaction = Some(at);
            }
        }
    }

    /// Set a confirmed balance on one cached account
    pub fn set_balance(&mut self, id: &AccountId, balance: Decimal, at: DateTime<Utc>) {
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == *id) {
            account.balance = balance;
            account.last_transaction = Some(at);
        }
    }

    /// Remove a set of accounts as a single filter pass
    pub fn remove_many(&mut self, ids: &HashSet<AccountId>) {
        self.accounts.retain(|a| !ids.contains(&a.id));
    }

    /// Recolor a set of accounts as a single map pass
    pub fn recolor_many(&mut self, ids: &HashSet<AccountId>, color: &str) {
        for account in self.accounts.iter_mut() {
            if ids.contains(&account.id) {
                account.color = color.to_string();
            }
        }
    }
}
