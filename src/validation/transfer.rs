//! Transfer validation
//!
//! Every applicable error is collected in one pass, never short-circuited,
//! so the user sees the full list of problems at once. Warnings flag
//! transfers that are admissible but unusual (draining most of the source,
//! or moving a large amount).

use super::ValidationResult;
use crate::types::Account;
use rust_decimal::Decimal;

/// Transfer limit configuration
///
/// Explicit struct rather than constants scattered through the checks, so
/// a caller can tighten or relax limits without touching the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLimits {
    /// Smallest transferable amount
    pub minimum: Decimal,

    /// Largest amount allowed in a single transfer
    pub cap: Decimal,

    /// Amount above which a large-transfer warning is raised
    pub large_amount: Decimal,

    /// Fraction of the source balance above which a drain warning is raised
    pub source_share: Decimal,
}

impl Default for TransferLimits {
    fn default() -> Self {
        TransferLimits {
            minimum: Decimal::new(1, 2),       // 0.01
            cap: Decimal::new(5000, 0),        // 5000 per transfer
            large_amount: Decimal::new(1000, 0),
            source_share: Decimal::new(8, 1),  // 80% of the source balance
        }
    }
}

/// Validate a proposed transfer between two accounts
///
/// Errors (all evaluated independently): non-positive amount, amount below
/// the minimum, amount above the per-transfer cap, same account on both
/// legs, currency mismatch, and a resulting source balance below the
/// source kind's floor. Warnings: amount exceeding the configured share
/// of the source balance, and amount above the large-transfer threshold.
pub fn validate_transfer(
    from: &Account,
    to: &Account,
    amount: Decimal,
    limits: &TransferLimits,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if amount <= Decimal::ZERO {
        result.error("Transfer amount must be positive");
    }
    if amount < limits.minimum {
        result.error(format!("Transfer amount must be at least {}", limits.minimum));
    }
    if amount > limits.cap {
        result.error(format!(
            "Transfer amount exceeds the per-transfer limit of {}",
            limits.cap
        ));
    }
    if from.id == to.id {
        result.error("Source and destination must be different accounts");
    }
    if from.currency != to.currency {
        result.error(format!(
            "Currency mismatch: {} vs {}",
            from.currency, to.currency
        ));
    }
    if from.balance - amount < from.kind.min_balance() {
        result.error(format!(
            "Transfer would take '{}' below its {} floor of {}",
            from.name,
            from.kind.label(),
            from.kind.min_balance()
        ));
    }

    if amount > from.balance * limits.source_share {
        result.warn(format!(
            "Transfer moves more than {}% of '{}'",
            (limits.source_share * Decimal::new(100, 0)).normalize(),
            from.name
        ));
    }
    if amount > limits.large_amount {
        result.warn(format!("Large transfer: {} is above {}", amount, limits.large_amount));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountKind;
    use chrono::Utc;
    use rstest::rstest;

    fn account(id: &str, kind: AccountKind, balance: i64, currency: &str) -> Account {
        Account {
            id: id.to_string(),
            name: format!("Account {}", id),
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

    #[test]
    fn test_plain_transfer_passes() {
        let from = account("a", AccountKind::Checking, 1000, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result = validate_transfer(&from, &to, Decimal::new(200, 0), &TransferLimits::default());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-5, 0))]
    fn test_non_positive_amount_rejected(#[case] amount: Decimal) {
        let from = account("a", AccountKind::Checking, 1000, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result = validate_transfer(&from, &to, amount, &TransferLimits::default());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_amount_over_cap_rejected() {
        let from = account("a", AccountKind::Checking, 10000, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result =
            validate_transfer(&from, &to, Decimal::new(6000, 0), &TransferLimits::default());
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("per-transfer limit")));
    }

    #[test]
    fn test_same_account_rejected() {
        let from = account("a", AccountKind::Checking, 1000, "EUR");
        let result =
            validate_transfer(&from, &from, Decimal::new(100, 0), &TransferLimits::default());
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.contains("different accounts")));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let from = account("a", AccountKind::Checking, 1000, "EUR");
        let to = account("b", AccountKind::Savings, 0, "USD");
        let result =
            validate_transfer(&from, &to, Decimal::new(100, 0), &TransferLimits::default());
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.contains("Currency mismatch")));
    }

    #[test]
    fn test_floor_violation_rejected() {
        // Checking floor is -1000: 500 - 1600 = -1100 is below it.
        let from = account("a", AccountKind::Checking, 500, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result =
            validate_transfer(&from, &to, Decimal::new(1600, 0), &TransferLimits::default());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_overdraft_within_floor_allowed() {
        // 500 - 1200 = -700 stays above the -1000 checking floor.
        let from = account("a", AccountKind::Checking, 500, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result =
            validate_transfer(&from, &to, Decimal::new(1200, 0), &TransferLimits::default());
        assert!(result.is_valid());
    }

    #[test]
    fn test_errors_are_collected_not_short_circuited() {
        // Same account, currency match, but over cap and draining: the
        // amount and identity errors must both be present.
        let from = account("a", AccountKind::Checking, 100, "EUR");
        let to = account("a", AccountKind::Checking, 100, "USD");
        let result =
            validate_transfer(&from, &to, Decimal::new(6000, 0), &TransferLimits::default());
        assert!(result.errors.len() >= 3);
    }

    #[test]
    fn test_drain_warning() {
        let from = account("a", AccountKind::Checking, 1000, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result =
            validate_transfer(&from, &to, Decimal::new(900, 0), &TransferLimits::default());
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.contains("80%")));
    }

    #[test]
    fn test_large_amount_warning() {
        let from = account("a", AccountKind::Checking, 5000, "EUR");
        let to = account("b", AccountKind::Savings, 0, "EUR");
        let result =
            validate_transfer(&from, &to, Decimal::new(2000, 0), &TransferLimits::default());
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.contains("Large transfer")));
    }
}
