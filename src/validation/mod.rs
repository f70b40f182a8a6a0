//! Validation engine
//!
//! Pure, synchronous admissibility checks for names, balances, and
//! transfers. Nothing here performs I/O or touches the store; every
//! mutating operation runs the relevant validator fully client-side
//! before any remote call is attempted.
//!
//! Results separate blocking errors from advisory warnings: a result is
//! valid exactly when it carries no errors, and warnings never block.

pub mod balance;
pub mod name;
pub mod transfer;

pub use balance::validate_account_balance;
pub use name::{check_duplicate_name, similarity, validate_account_name};
pub use transfer::{validate_transfer, TransferLimits};

/// Outcome of a validation pass
///
/// Errors block the operation; warnings are surfaced to the user but
/// never prevent submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Blocking failures, in evaluation order
    pub errors: Vec<String>,

    /// Advisory notices, in evaluation order
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty, passing result
    pub fn ok() -> Self {
        ValidationResult::default()
    }

    /// Whether the validated input is admissible
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a blocking error
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record a non-blocking warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
