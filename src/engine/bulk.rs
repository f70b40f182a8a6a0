//! Bulk operation engine
//!
//! Two-phase state machine over a selected account set: an operation is
//! staged together with its selection, must be explicitly confirmed, and
//! only then executes. No mutation happens before confirmation, and two
//! different operation types are never staged at once (staging replaces
//! whatever was staged before).
//!
//! The execution semantics differ per operation, on purpose:
//!
//! - **delete** issues remote deletes *sequentially*, one in flight at a
//!   time, giving a deterministic partial-failure point. Local removal is
//!   a single filter over the whole selection and runs only after every
//!   remote call succeeded. A mid-sequence failure returns before that
//!   step, so the cache still shows accounts the authority has already
//!   deleted — a known reconciliation gap; [`LedgerEngine::load`] is the
//!   manual way out, nothing reconciles automatically.
//! - **color change** issues all remote updates *concurrently* and
//!   applies one local recolor pass only on total success. Higher
//!   throughput, weaker partial-failure guarantee on the remote side;
//!   all-or-nothing at the local boundary either way.
//! - **export** never touches the network and has no partial-failure
//!   mode at all.
//!
//! After any successful execution exactly one aggregate activity entry is
//! recorded (the affected count, not one entry per account), then the
//! selection and staged parameters reset.

use super::LedgerEngine;
use crate::io::{export_accounts, ExportFormat};
use crate::types::{Account, AccountId, AccountPatch, ActivityKind, LedgerError};
use futures::future::join_all;
use log::{info, warn};
use std::collections::HashSet;

/// A stageable batch mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOperation {
    /// Delete every selected account
    Delete,

    /// Apply one color to every selected account
    ColorChange { color: String },

    /// Serialize a snapshot of the selected accounts
    Export { format: ExportFormat },
}

impl BulkOperation {
    /// Short name for messages and log lines
    pub fn name(&self) -> &'static str {
        match self {
            BulkOperation::Delete => "delete",
            BulkOperation::ColorChange { .. } => "color change",
            BulkOperation::Export { .. } => "export",
        }
    }
}

/// Bulk state machine: idle, or one staged operation awaiting its gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum BulkState {
    Idle,
    Staged {
        operation: BulkOperation,
        selection: Vec<AccountId>,
        confirmed: bool,
    },
}

/// Result of a successfully executed bulk operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Number of accounts the operation covered
    pub affected: usize,

    /// The serialized snapshot, for export operations only
    pub export: Option<String>,
}

impl LedgerEngine {
    /// Stage a bulk operation over a selection of account ids
    ///
    /// Replaces any previously staged operation and opens the
    /// confirmation gate. The selection must be non-empty and every id
    /// must exist in the store.
    pub fn stage_bulk(
        &mut self,
        operation: BulkOperation,
        selection: Vec<AccountId>,
    ) -> Result<(), LedgerError> {
        if selection.is_empty() {
            return Err(LedgerError::empty_selection(operation.name()));
        }
        for id in &selection {
            self.account(id)?;
        }

        self.bulk = BulkState::Staged {
            operation,
            selection,
            confirmed: false,
        };
        Ok(())
    }

    /// Pass the confirmation gate for the staged operation
    pub fn confirm_bulk(&mut self) -> Result<(), LedgerError> {
        match &mut self.bulk {
            BulkState::Idle => Err(LedgerError::validation(vec![
                "No bulk operation is staged".to_string(),
            ])),
            BulkState::Staged { confirmed, .. } => {
                *confirmed = true;
                Ok(())
            }
        }
    }

    /// Discard the staged operation and selection
    pub fn cancel_bulk(&mut self) {
        self.bulk = BulkState::Idle;
    }

    /// The currently staged operation, if any
    pub fn staged_bulk(&self) -> Option<&BulkOperation> {
        match &self.bulk {
            BulkState::Idle => None,
            BulkState::Staged { operation, .. } => Some(operation),
        }
    }

    /// Execute the staged-and-confirmed bulk operation
    ///
    /// Executing while merely staged yields `ConfirmationRequired`. On a
    /// remote failure the staged state is kept (so the user can retry or
    /// cancel) and the local cache is left fully unmodified.
    pub async fn execute_bulk(&mut self) -> Result<BulkOutcome, LedgerError> {
        let (operation, selection) = match &self.bulk {
            BulkState::Idle => {
                return Err(LedgerError::validation(vec![
                    "No bulk operation is staged".to_string(),
                ]))
            }
            BulkState::Staged { operation, confirmed, .. } if !*confirmed => {
                return Err(LedgerError::confirmation_required(operation.name()))
            }
            BulkState::Staged {
                operation,
                selection,
                ..
            } => (operation.clone(), selection.clone()),
        };

        let outcome = match operation {
            BulkOperation::Delete => self.bulk_delete(&selection).await?,
            BulkOperation::ColorChange { color } => {
                self.bulk_color_change(&selection, &color).await?
            }
            BulkOperation::Export { format } => self.bulk_export(&selection, format)?,
        };

        self.bulk = BulkState::Idle;
        Ok(outcome)
    }

    /// Sequential remote deletes, then one local filter pass
    async fn bulk_delete(&mut self, selection: &[AccountId]) -> Result<BulkOutcome, LedgerError> {
        for id in selection {
            // One call in flight at a time: a failure here returns before
            // the local removal below, leaving already-deleted remote
            // accounts visible in the cache.
            if let Err(e) = self.api.delete(id).await {
                warn!("bulk delete stopped at {}: {}", id, e);
                return Err(e.into());
            }
        }

        let ids: HashSet<AccountId> = selection.iter().cloned().collect();
        self.store.remove_many(&ids);
        info!("bulk deleted {} accounts", selection.len());

        self.activity.record(
            ActivityKind::AccountDeleted,
            format!("Deleted {} accounts", selection.len()),
            None,
            ActivityKind::AccountDeleted.default_color(),
        );
        Ok(BulkOutcome {
            affected: selection.len(),
            export: None,
        })
    }

    /// Concurrent remote updates, then one local recolor pass
    async fn bulk_color_change(
        &mut self,
        selection: &[AccountId],
        color: &str,
    ) -> Result<BulkOutcome, LedgerError> {
        let calls = selection
            .iter()
            .map(|id| self.api.update(id, AccountPatch::color(color)));
        let results = join_all(calls).await;

        // Total success or nothing locally: some accounts may already be
        // recolored remotely when a sibling call failed.
        for result in results {
            if let Err(e) = result {
                warn!("bulk color change failed: {}", e);
                return Err(e.into());
            }
        }

        let ids: HashSet<AccountId> = selection.iter().cloned().collect();
        self.store.recolor_many(&ids, color);
        info!("recolored {} accounts to {}", selection.len(), color);

        self.activity.record(
            ActivityKind::BulkColorChange,
            format!("Changed color of {} accounts", selection.len()),
            None,
            ActivityKind::BulkColorChange.default_color(),
        );
        Ok(BulkOutcome {
            affected: selection.len(),
            export: None,
        })
    }

    /// Synchronous snapshot build, no network involved
    fn bulk_export(
        &mut self,
        selection: &[AccountId],
        format: ExportFormat,
    ) -> Result<BulkOutcome, LedgerError> {
        let accounts: Vec<&Account> = selection
            .iter()
            .map(|id| self.account(id))
            .collect::<Result<_, _>>()?;
        let document = export_accounts(&accounts, format)?;

        self.activity.record(
            ActivityKind::Export,
            format!("Exported {} accounts", selection.len()),
            None,
            ActivityKind::Export.default_color(),
        );
        Ok(BulkOutcome {
            affected: selection.len(),
            export: Some(document),
        })
    }
}
