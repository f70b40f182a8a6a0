//! CLI argument parsing
//!
//! Defines the command-line surface of the `ledger` binary. Dispatch
//! lives in `main.rs`; this module only parses.

pub mod args;

pub use args::{CliArgs, Command, FormatArg, KindArg};

use clap::Parser;

/// Parse command-line arguments
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
