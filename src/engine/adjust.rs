//! Balance adjustment executor
//!
//! Manual single-account corrections. The reason is mandatory and ends
//! up in the activity log; the entry is tagged and colored by the sign
//! of the difference and carries the absolute difference as its amount.

use super::LedgerEngine;
use crate::types::{ActivityKind, BalanceAdjustment, LedgerError};
use crate::validation::validate_account_balance;
use chrono::Utc;
use log::info;
use rust_decimal::Decimal;

impl LedgerEngine {
    /// Apply a manual balance correction
    ///
    /// Returns the non-blocking validation warnings on success.
    pub async fn adjust_balance(
        &mut self,
        adjustment: BalanceAdjustment,
    ) -> Result<Vec<String>, LedgerError> {
        if adjustment.reason.trim().is_empty() {
            return Err(LedgerError::validation(vec![
                "An adjustment reason is required".to_string(),
            ]));
        }

        let account = self.account(&adjustment.account)?.clone();
        let checks = validate_account_balance(adjustment.new_balance, account.kind);
        if !checks.is_valid() {
            return Err(LedgerError::validation(checks.errors));
        }

        let difference = adjustment.new_balance - account.balance;

        self.api
            .adjust_balance(&adjustment.account, adjustment.new_balance, &adjustment.reason)
            .await?;
        info!(
            "adjusted {} from {} to {} ({})",
            adjustment.account, account.balance, adjustment.new_balance, adjustment.reason
        );

        self.store
            .set_balance(&adjustment.account, adjustment.new_balance, Utc::now());

        let kind = if difference < Decimal::ZERO {
            ActivityKind::BalanceDecrease
        } else {
            ActivityKind::BalanceIncrease
        };
        self.activity.record(
            kind,
            format!("Corrected '{}': {}", account.name, adjustment.reason),
            Some(difference.abs()),
            kind.default_color(),
        );

        Ok(checks.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::AccountKind;

    fn adjustment(account: &str, new_balance: i64, reason: &str) -> BalanceAdjustment {
        BalanceAdjustment {
            account: account.to_string(),
            new_balance: Decimal::new(new_balance, 0),
            reason: reason.to_string(),
        }
    }

    async fn engine() -> LedgerEngine {
        let mut engine = LedgerEngine::new(Box::new(seeded_api(vec![account(
            "acc-1",
            "Main",
            AccountKind::Checking,
            1000,
            "EUR",
        )])));
        engine.load().await.unwrap();
        engine
    }

    #[tokio::test]
    async fn test_adjustment_sets_balance_and_stamps_timestamp() {
        let mut engine = engine().await;
        engine
            .adjust_balance(adjustment("acc-1", 1200, "missed paycheck"))
            .await
            .unwrap();

        let account = engine.account(&"acc-1".to_string()).unwrap();
        assert_eq!(account.balance, Decimal::new(1200, 0));
        assert!(account.last_transaction.is_some());
    }

    #[tokio::test]
    async fn test_upward_adjustment_tagged_increase_with_abs_amount() {
        let mut engine = engine().await;
        engine
            .adjust_balance(adjustment("acc-1", 1250, "found receipt"))
            .await
            .unwrap();

        let entry = &engine.activity().entries()[0];
        assert_eq!(entry.kind, ActivityKind::BalanceIncrease);
        assert_eq!(entry.amount, Some(Decimal::new(250, 0)));
    }

    #[tokio::test]
    async fn test_downward_adjustment_tagged_decrease_with_abs_amount() {
        let mut engine = engine().await;
        engine
            .adjust_balance(adjustment("acc-1", 700, "bank fee"))
            .await
            .unwrap();

        let entry = &engine.activity().entries()[0];
        assert_eq!(entry.kind, ActivityKind::BalanceDecrease);
        assert_eq!(entry.amount, Some(Decimal::new(300, 0)));
    }

    #[tokio::test]
    async fn test_empty_reason_rejected_before_network() {
        let mut engine = engine().await;
        let result = engine.adjust_balance(adjustment("acc-1", 900, "   ")).await;
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
        assert_eq!(
            engine.account(&"acc-1".to_string()).unwrap().balance,
            Decimal::new(1000, 0)
        );
    }

    #[tokio::test]
    async fn test_adjustment_below_floor_rejected() {
        let mut engine = engine().await;
        let result = engine
            .adjust_balance(adjustment("acc-1", -1500, "impossible"))
            .await;
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_old_balance() {
        let api = seeded_api(vec![account("acc-1", "Main", AccountKind::Checking, 1000, "EUR")]);
        api.fail_on(&"acc-1".to_string());
        let mut engine = LedgerEngine::new(Box::new(api));
        engine.load().await.unwrap();

        let result = engine.adjust_balance(adjustment("acc-1", 1200, "sync")).await;
        assert!(matches!(result, Err(LedgerError::Remote(_))));
        assert_eq!(
            engine.account(&"acc-1".to_string()).unwrap().balance,
            Decimal::new(1000, 0)
        );
        assert!(engine.activity().is_empty());
    }
}
