//! Account snapshot export
//!
//! Builds a portable snapshot (name, type, balance, currency, bank,
//! creation date) of a selected account set, serialized as JSON or CSV.
//! Purely synchronous: export is the one bulk operation with no network
//! call and no partial-failure mode.
//!
//! Monetary values are written as two-decimal amounts next to their ISO
//! currency code; no locale machinery is involved.

use crate::types::{Account, LedgerError};
use serde::{Deserialize, Serialize};

/// Supported snapshot formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// One account in an export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    /// Two-decimal monetary amount
    pub balance: String,

    /// ISO 4217 code
    pub currency: String,

    pub bank: Option<String>,

    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl ExportRow {
    fn from_account(account: &Account) -> Self {
        ExportRow {
            name: account.name.clone(),
            kind: account.kind.label().to_string(),
            balance: format!("{:.2}", account.balance.round_dp(2)),
            currency: account.currency.clone(),
            bank: account.bank.clone(),
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// Serialize a snapshot of the given accounts in the requested format
pub fn export_accounts(accounts: &[&Account], format: ExportFormat) -> Result<String, LedgerError> {
    let rows: Vec<ExportRow> = accounts.iter().map(|a| ExportRow::from_account(a)).collect();
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(&rows)
            .map_err(|e| LedgerError::export(e.to_string())),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in &rows {
                writer
                    .serialize(row)
                    .map_err(|e| LedgerError::export(e.to_string()))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| LedgerError::export(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| LedgerError::export(e.to_string()))
        }
    }
}
