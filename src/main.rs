//! Ledger CLI
//!
//! Command-line front end over the ledger engine, backed by a JSON file
//! acting as the account authority.
//!
//! # Usage
//!
//! ```bash
//! ledger --file ledger.json create --name "Main" --kind checking --balance 500
//! ledger transfer --from acc-1 --to acc-2 --amount 120.00
//! ledger adjust --account acc-1 --balance 480 --reason "bank fee"
//! ledger delete acc-3 --yes
//! ledger export --format csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (validation failure, unknown account, remote failure, etc.)

use ledger_engine::api::JsonFileAccountsApi;
use ledger_engine::cli::{self, CliArgs, Command};
use ledger_engine::engine::LedgerEngine;
use ledger_engine::types::{AccountDraft, BalanceAdjustment, LedgerError, TransferRequest};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = cli::parse_args();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), LedgerError> {
    let api = JsonFileAccountsApi::new(&args.file);
    let mut engine = LedgerEngine::new(Box::new(api));
    engine.load().await?;

    // Bulk commands go through the staged-confirm-execute gate; --yes is
    // the confirmation step.
    if let Some(operation) = args.command.bulk_operation() {
        let (ids, confirmed) = match &args.command {
            Command::Delete { ids, yes } => (ids.clone(), *yes),
            Command::Recolor { ids, yes, .. } => (ids.clone(), *yes),
            Command::Export { ids, .. } => {
                let ids = if ids.is_empty() {
                    engine.accounts().iter().map(|a| a.id.clone()).collect()
                } else {
                    ids.clone()
                };
                // Export mutates nothing, so it is auto-confirmed.
                (ids, true)
            }
            _ => unreachable!("bulk_operation() only matches bulk commands"),
        };

        engine.stage_bulk(operation, ids)?;
        if confirmed {
            engine.confirm_bulk()?;
        }
        let outcome = engine.execute_bulk().await?;
        match outcome.export {
            Some(document) => println!("{}", document),
            None => println!("Done: {} accounts affected", outcome.affected),
        }
        return Ok(());
    }

    match args.command {
        Command::List => {
            for account in engine.accounts() {
                println!(
                    "{}  {:<20} {:>12} {}  [{}]",
                    account.id,
                    account.name,
                    account.balance.round_dp(2),
                    account.currency,
                    account.kind.label()
                );
            }
        }
        Command::Create {
            name,
            kind,
            balance,
            currency,
            color,
            bank,
        } => {
            let (account, warnings) = engine
                .create_account(AccountDraft {
                    name,
                    kind: kind.into(),
                    balance,
                    currency,
                    color,
                    bank,
                })
                .await?;
            print_warnings(&warnings);
            println!("Created {} ('{}')", account.id, account.name);
        }
        Command::Transfer {
            from,
            to,
            amount,
            description,
        } => {
            let warnings = engine
                .transfer(TransferRequest {
                    from,
                    to,
                    amount,
                    description,
                })
                .await?;
            print_warnings(&warnings);
            println!("Transferred {}", amount.round_dp(2));
        }
        Command::Adjust {
            account,
            balance,
            reason,
        } => {
            let warnings = engine
                .adjust_balance(BalanceAdjustment {
                    account: account.clone(),
                    new_balance: balance,
                    reason,
                })
                .await?;
            print_warnings(&warnings);
            println!("Adjusted {} to {}", account, balance.round_dp(2));
        }
        Command::Delete { .. } | Command::Recolor { .. } | Command::Export { .. } => {
            unreachable!("bulk commands are handled above")
        }
    }

    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}
