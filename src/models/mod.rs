//! Core data models for banker
//!
//! Accounts, transactions and the ordered `TransactionList` that balance
//! history is computed from.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod transaction_list;

pub use account::Account;
pub use ids::{AccountId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::Transaction;
pub use transaction_list::TransactionList;
