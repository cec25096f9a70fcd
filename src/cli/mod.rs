//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod account;
pub mod plot;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use plot::{handle_backends_command, handle_plot_command, PlotArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};
