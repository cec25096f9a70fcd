//! Business logic layer
//!
//! Services sit between the CLI and storage. `balance` holds the controller
//! that plot panels draw from.

pub mod account;
pub mod balance;
pub mod import;
pub mod transaction;

pub use account::{AccountService, AccountSummary};
pub use balance::{BalanceController, BalanceSeries, Granularity};
pub use import::{ColumnMapping, ImportResult, ImportService, ImportStatus};
pub use transaction::TransactionService;
