//! Balance validation against per-kind floors
//!
//! A balance below the kind's floor is a blocking error. Low balances
//! that are still admissible produce warnings: a negative checking
//! balance (overdraft in use), or any other kind dropping below the
//! low-balance threshold.

use super::ValidationResult;
use crate::types::AccountKind;
use rust_decimal::Decimal;

/// Balance below which non-checking accounts get a low-balance warning
const LOW_BALANCE_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Validate a balance for an account of the given kind
pub fn validate_account_balance(balance: Decimal, kind: AccountKind) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let floor = kind.min_balance();

    if balance < floor {
        result.error(format!(
            "Balance {} is below the {} floor of {}",
            balance,
            kind.label(),
            floor
        ));
        return result;
    }

    match kind {
        AccountKind::Checking => {
            if balance < Decimal::ZERO {
                result.warn(format!("Checking account is overdrawn by {}", -balance));
            }
        }
        _ => {
            if balance < LOW_BALANCE_THRESHOLD {
                result.warn(format!("{} balance is low: {}", kind.label(), balance));
            }
        }
    }

    result
}
