//! Transfer executor
//!
//! Validates fully client-side, fast-fails on an uncovered amount, then
//! commits against the remote authority. Both balance deltas land in the
//! local store as one symmetric update, and exactly one activity entry is
//! appended, carrying the transferred amount. A remote failure changes
//! nothing locally and is never retried; the caller must resubmit.

use super::LedgerEngine;
use crate::types::{ActivityKind, LedgerError, TransferRequest};
use crate::validation::validate_transfer;
use chrono::Utc;
use log::{info, warn};

impl LedgerEngine {
    /// Execute a transfer between two accounts
    ///
    /// Returns the non-blocking validation warnings on success.
    pub async fn transfer(&mut self, request: TransferRequest) -> Result<Vec<String>, LedgerError> {
        let from = self.account(&request.from)?.clone();
        let to = self.account(&request.to)?.clone();

        let checks = validate_transfer(&from, &to, request.amount, &self.limits);
        if !checks.is_valid() {
            return Err(LedgerError::validation(checks.errors));
        }
        for warning in &checks.warnings {
            warn!("transfer warning: {}", warning);
        }

        // An uncovered amount must never reach the remote authority,
        // even when the overdraft floor would admit the resulting balance.
        if from.balance < request.amount {
            return Err(LedgerError::insufficient_funds(
                &from.id,
                from.balance,
                request.amount,
            ));
        }

        self.api
            .transfer(
                &request.from,
                &request.to,
                request.amount,
                request.description.as_deref(),
            )
            .await?;
        info!(
            "transferred {} from {} to {}",
            request.amount, request.from, request.to
        );

        self.store
            .apply_transfer(&request.from, &request.to, request.amount, Utc::now());

        let description = match &request.description {
            Some(note) => format!("Transfer '{}' → '{}': {}", from.name, to.name, note),
            None => format!("Transfer '{}' → '{}'", from.name, to.name),
        };
        self.activity.record(
            ActivityKind::Transfer,
            description,
            Some(request.amount),
            ActivityKind::Transfer.default_color(),
        );

        Ok(checks.warnings)
    }
}
