//! Ledger engine
//!
//! Orchestrates every mutation of the account set by coordinating the
//! remote Accounts API, the local account store, and the activity log.
//! The ordering discipline is the same for every operation:
//!
//! 1. validate fully client-side (no network),
//! 2. commit against the remote authority,
//! 3. only on remote success, apply the change to the local store and
//!    append one activity entry.
//!
//! A remote failure leaves the local cache untouched and is surfaced
//! once, never retried. Single-account operations therefore never leave
//! a partially-applied local mutation; the bulk operations in
//! [`bulk`] weaken this deliberately (see that module).

mod adjust;
mod bulk;
mod transfer;

pub use bulk::{BulkOperation, BulkOutcome};

use crate::activity::ActivityLog;
use crate::api::AccountsApi;
use crate::store::AccountStore;
use crate::types::{
    Account, AccountDraft, AccountId, AccountPatch, ActivityId, ActivityKind, LedgerError,
};
use crate::validation::{
    check_duplicate_name, validate_account_balance, validate_account_name, TransferLimits,
    ValidationResult,
};
use bulk::BulkState;
use log::{debug, info};

/// Central coordinator for account mutations
///
/// Owns the remote API handle, the cached store, the activity log, and
/// the bulk-operation state machine. There is exactly one logical writer:
/// double submission is prevented cooperatively by the caller (disable
/// the submit control while a call is in flight), not by this engine.
pub struct LedgerEngine {
    api: Box<dyn AccountsApi>,
    store: AccountStore,
    activity: ActivityLog,
    limits: TransferLimits,
    bulk: BulkState,
}

impl LedgerEngine {
    /// Create an engine over the given remote backend, with default limits
    pub fn new(api: Box<dyn AccountsApi>) -> Self {
        LedgerEngine {
            api,
            store: AccountStore::new(),
            activity: ActivityLog::new(),
            limits: TransferLimits::default(),
            bulk: BulkState::Idle,
        }
    }

    /// Override the transfer limit configuration
    pub fn with_limits(mut self, limits: TransferLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Load the account set from the remote authority
    ///
    /// Called once on startup; also usable as a manual reconciliation
    /// step after a partial bulk failure (nothing triggers it
    /// automatically).
    pub async fn load(&mut self) -> Result<(), LedgerError> {
        let accounts = self.api.list().await?;
        debug!("loaded {} accounts from remote", accounts.len());
        self.store.replace_all(accounts);
        Ok(())
    }

    /// Cached accounts, in remote order
    pub fn accounts(&self) -> &[Account] {
        self.store.accounts()
    }

    /// Look up one cached account
    pub fn account(&self, id: &AccountId) -> Result<&Account, LedgerError> {
        self.store
            .get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Look up one cached account by name, case-insensitively
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.store.get_by_name(name)
    }

    /// The activity feed, most recent first
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Redact one activity entry from the local feed
    pub fn remove_activity(&mut self, id: ActivityId) -> bool {
        self.activity.remove(id)
    }

    /// Create a new account
    ///
    /// Validates the name (including duplicate detection against the
    /// cached set) and the opening balance before any network call.
    /// Returns the created account and any non-blocking warnings.
    pub async fn create_account(
        &mut self,
        mut draft: AccountDraft,
    ) -> Result<(Account, Vec<String>), LedgerError> {
        // The trimmed name is what gets validated, so it must also be
        // what gets created; otherwise " Main" slips past the duplicate
        // check and lands in the store next to "Main".
        draft.name = draft.name.trim().to_string();

        let mut checks = validate_account_name(&draft.name);
        merge(&mut checks, check_duplicate_name(&draft.name, self.store.accounts(), None));
        merge(&mut checks, validate_account_balance(draft.balance, draft.kind));
        if !checks.is_valid() {
            return Err(LedgerError::validation(checks.errors));
        }

        let account = self.api.create(draft).await?;
        info!("created account {} ('{}')", account.id, account.name);

        self.store.insert(account.clone());
        self.activity.record(
            ActivityKind::AccountCreated,
            format!("Created account '{}'", account.name),
            None,
            ActivityKind::AccountCreated.default_color(),
        );
        Ok((account, checks.warnings))
    }

    /// Update an existing account
    ///
    /// A name change is re-validated with the account itself excluded
    /// from duplicate detection, so renames never flag the account
    /// against its own current name.
    pub async fn update_account(
        &mut self,
        id: &AccountId,
        mut patch: AccountPatch,
    ) -> Result<(Account, Vec<String>), LedgerError> {
        self.account(id)?;

        if let Some(name) = &mut patch.name {
            *name = name.trim().to_string();
        }

        let mut warnings = Vec::new();
        if let Some(name) = &patch.name {
            let mut checks = validate_account_name(name);
            merge(
                &mut checks,
                check_duplicate_name(name, self.store.accounts(), Some(id)),
            );
            if !checks.is_valid() {
                return Err(LedgerError::validation(checks.errors));
            }
            warnings = checks.warnings;
        }

        let updated = self.api.update(id, patch).await?;
        debug!("updated account {}", id);

        self.store.upsert(updated.clone());
        self.activity.record(
            ActivityKind::AccountUpdated,
            format!("Updated account '{}'", updated.name),
            None,
            ActivityKind::AccountUpdated.default_color(),
        );
        Ok((updated, warnings))
    }

    /// Delete a single account
    pub async fn delete_account(&mut self, id: &AccountId) -> Result<(), LedgerError> {
        let name = self.account(id)?.name.clone();

        self.api.delete(id).await?;
        info!("deleted account {} ('{}')", id, name);

        self.store.remove_many(&std::iter::once(id.clone()).collect());
        self.activity.record(
            ActivityKind::AccountDeleted,
            format!("Deleted account '{}'", name),
            None,
            ActivityKind::AccountDeleted.default_color(),
        );
        Ok(())
    }
}

/// Fold one validation result into another, keeping evaluation order
fn merge(into: &mut ValidationResult, from: ValidationResult) {
    into.errors.extend(from.errors);
    into.warnings.extend(from.warnings);
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::InMemoryAccountsApi;
    use crate::types::{Account, AccountDraft, AccountKind};
    use chrono::Utc;
    use rust_decimal::Decimal;

    pub fn account(id: &str, name: &str, kind: AccountKind, balance: i64, currency: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            balance: Decimal::new(balance, 0),
            currency: currency.to_string(),
            color: "#3b82f6".to_string(),
            bank: None,
            is_active: true,
            created_at: Utc::now(),
            last_transaction: None,
        }
    }

    pub fn draft(name: &str, kind: AccountKind, balance: i64) -> AccountDraft {
        AccountDraft {
            name: name.to_string(),
            kind,
            balance: Decimal::new(balance, 0),
            currency: "EUR".to_string(),
            color: "#3b82f6".to_string(),
            bank: None,
        }
    }

    pub fn seeded_api(accounts: Vec<Account>) -> InMemoryAccountsApi {
        InMemoryAccountsApi::with_accounts(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::types::AccountKind;
    use rust_decimal::Decimal;

    async fn engine_with(accounts: Vec<Account>) -> LedgerEngine {
        let mut engine = LedgerEngine::new(Box::new(seeded_api(accounts)));
        engine.load().await.unwrap();
        engine
    }

    #[tokio::test]
    async fn test_load_populates_store() {
        let engine = engine_with(vec![
            account("acc-1", "Main", AccountKind::Checking, 1000, "EUR"),
            account("acc-2", "Savings", AccountKind::Savings, 500, "EUR"),
        ])
        .await;
        assert_eq!(engine.accounts().len(), 2);
        assert_eq!(engine.account_by_name("MAIN").unwrap().id, "acc-1");
    }

    #[tokio::test]
    async fn test_create_account_validates_before_network() {
        let mut engine = engine_with(vec![]).await;
        let result = engine
            .create_account(draft("admin", AccountKind::Checking, 0))
            .await;
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
        assert_eq!(engine.accounts().len(), 0);
        assert!(engine.activity().is_empty());
    }

    #[tokio::test]
    async fn test_create_account_rejects_duplicate_name() {
        let mut engine =
            engine_with(vec![account("acc-1", "conto corrente", AccountKind::Checking, 0, "EUR")])
                .await;
        let result = engine
            .create_account(draft("Conto Corrente", AccountKind::Savings, 100))
            .await;
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_account_appends_store_and_activity() {
        let mut engine = engine_with(vec![]).await;
        let (created, warnings) = engine
            .create_account(draft("Main", AccountKind::Checking, 100))
            .await
            .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(engine.account(&created.id).unwrap().name, "Main");
        assert_eq!(engine.activity().len(), 1);
        assert_eq!(engine.activity().entries()[0].kind, ActivityKind::AccountCreated);
    }

    #[tokio::test]
    async fn test_create_trims_name_before_validation_and_creation() {
        let mut engine =
            engine_with(vec![account("acc-1", "Main", AccountKind::Checking, 100, "EUR")]).await;

        // Padding must not sneak a duplicate past the exact check.
        let result = engine
            .create_account(draft(" Main", AccountKind::Savings, 0))
            .await;
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
        assert_eq!(engine.accounts().len(), 1);

        // And the stored name is the trimmed one.
        let (created, _) = engine
            .create_account(draft("  Wallet ", AccountKind::Cash, 20))
            .await
            .unwrap();
        assert_eq!(created.name, "Wallet");
        assert_eq!(engine.account(&created.id).unwrap().name, "Wallet");
    }

    #[tokio::test]
    async fn test_create_account_opening_balance_floor() {
        let mut engine = engine_with(vec![]).await;
        let result = engine
            .create_account(draft("Deep Red", AccountKind::Checking, -1500))
            .await;
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_rename_excludes_own_account_from_duplicates() {
        let mut engine =
            engine_with(vec![account("acc-1", "Savings", AccountKind::Savings, 50, "EUR")]).await;
        let patch = AccountPatch {
            name: Some("Savings".to_string()),
            ..Default::default()
        };
        // Renaming to its own current name is admissible.
        let result = engine.update_account(&"acc-1".to_string(), patch).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_account_removes_and_records() {
        let mut engine =
            engine_with(vec![account("acc-1", "Old", AccountKind::Cash, 0, "EUR")]).await;
        engine.delete_account(&"acc-1".to_string()).await.unwrap();
        assert!(engine.accounts().is_empty());
        assert_eq!(engine.activity().entries()[0].kind, ActivityKind::AccountDeleted);
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_cache_untouched() {
        let api = seeded_api(vec![account("acc-1", "Main", AccountKind::Checking, 100, "EUR")]);
        api.fail_on(&"acc-1".to_string());
        let mut engine = LedgerEngine::new(Box::new(api));
        engine.load().await.unwrap();

        let result = engine.delete_account(&"acc-1".to_string()).await;
        assert!(matches!(result, Err(LedgerError::Remote(_))));
        assert_eq!(engine.accounts().len(), 1);
        assert!(engine.activity().is_empty());
    }

    #[tokio::test]
    async fn test_cash_balance_adjust_floor_holds_after_mutations() {
        let mut engine = engine_with(vec![]).await;
        let (created, _) = engine
            .create_account(draft("Wallet", AccountKind::Cash, 50))
            .await
            .unwrap();
        for account in engine.accounts() {
            assert!(account.balance >= account.kind.min_balance());
        }
        assert_eq!(created.balance, Decimal::new(50, 0));
    }
}
