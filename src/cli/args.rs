use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::engine::BulkOperation;
use crate::io::ExportFormat;
use crate::types::AccountKind;

/// Manage a personal-finance account ledger
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Account ledger with transfer validation", long_about = None)]
pub struct CliArgs {
    /// Path to the ledger file acting as the account authority
    #[arg(long = "file", value_name = "FILE", default_value = "ledger.json")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all accounts
    List,

    /// Create a new account
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, value_enum)]
        kind: KindArg,

        /// Opening balance
        #[arg(long, default_value = "0")]
        balance: Decimal,

        /// ISO currency code
        #[arg(long, default_value = "EUR")]
        currency: String,

        #[arg(long, default_value = "#3b82f6")]
        color: String,

        #[arg(long)]
        bank: Option<String>,
    },

    /// Move money between two accounts
    Transfer {
        /// Source account id
        #[arg(long)]
        from: String,

        /// Destination account id
        #[arg(long)]
        to: String,

        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        description: Option<String>,
    },

    /// Correct an account balance manually
    Adjust {
        /// Account id
        #[arg(long)]
        account: String,

        /// Balance the account should end up with
        #[arg(long)]
        balance: Decimal,

        /// Required justification
        #[arg(long)]
        reason: String,
    },

    /// Delete the selected accounts (asks for --yes)
    Delete {
        /// Account ids to delete
        #[arg(required = true)]
        ids: Vec<String>,

        /// Confirm the staged operation
        #[arg(long)]
        yes: bool,
    },

    /// Recolor the selected accounts (asks for --yes)
    Recolor {
        #[arg(long)]
        color: String,

        /// Account ids to recolor
        #[arg(required = true)]
        ids: Vec<String>,

        /// Confirm the staged operation
        #[arg(long)]
        yes: bool,
    },

    /// Export a snapshot of the selected accounts
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,

        /// Account ids to export; all accounts when omitted
        ids: Vec<String>,
    },
}

/// Account kinds accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Checking,
    Savings,
    Card,
    Investment,
    Business,
    Cash,
}

impl From<KindArg> for AccountKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Checking => AccountKind::Checking,
            KindArg::Savings => AccountKind::Savings,
            KindArg::Card => AccountKind::Card,
            KindArg::Investment => AccountKind::Investment,
            KindArg::Business => AccountKind::Business,
            KindArg::Cash => AccountKind::Cash,
        }
    }
}

/// Export formats accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

impl Command {
    /// The bulk operation this command stages, if it is a bulk command
    pub fn bulk_operation(&self) -> Option<BulkOperation> {
        match self {
            Command::Delete { .. } => Some(BulkOperation::Delete),
            Command::Recolor { color, .. } => Some(BulkOperation::ColorChange {
                color: color.clone(),
            }),
            Command::Export { format, .. } => Some(BulkOperation::Export {
                format: (*format).into(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_file_and_list() {
        let args = CliArgs::try_parse_from(["ledger", "list"]).unwrap();
        assert_eq!(args.file, PathBuf::from("ledger.json"));
        assert!(matches!(args.command, Command::List));
    }

    #[test]
    fn test_transfer_parses_decimal_amount() {
        let args = CliArgs::try_parse_from([
            "ledger", "transfer", "--from", "acc-1", "--to", "acc-2", "--amount", "12.50",
        ])
        .unwrap();
        match args.command {
            Command::Transfer { amount, .. } => assert_eq!(amount, Decimal::new(1250, 2)),
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[rstest]
    #[case::checking("checking", AccountKind::Checking)]
    #[case::cash("cash", AccountKind::Cash)]
    fn test_kind_argument_maps(#[case] kind: &str, #[case] expected: AccountKind) {
        let args = CliArgs::try_parse_from([
            "ledger", "create", "--name", "Main", "--kind", kind,
        ])
        .unwrap();
        match args.command {
            Command::Create { kind, .. } => assert_eq!(AccountKind::from(kind), expected),
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_requires_at_least_one_id() {
        assert!(CliArgs::try_parse_from(["ledger", "delete"]).is_err());
    }

    #[rstest]
    #[case::missing_command(&["ledger"])]
    #[case::bad_amount(&["ledger", "transfer", "--from", "a", "--to", "b", "--amount", "abc"])]
    #[case::bad_kind(&["ledger", "create", "--name", "X", "--kind", "wallet"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
