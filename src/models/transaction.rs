//! Transaction model
//!
//! A single dated movement of money in one account. Equality is structural:
//! two transactions are equal when account, date, amount and description
//! match. The generated id is bookkeeping and does not take part.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn new(
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            date,
            amount,
            description: description.into(),
        }
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.account_id == other.account_id
            && self.date == other.date
            && self.amount == other.amount
            && self.description == other.description
    }
}

impl Eq for Transaction {}
