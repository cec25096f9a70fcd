//! Transaction repository for JSON storage
//!
//! Transactions are kept in insertion order so same-day entries replay in
//! the order they were recorded.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BankerError;
use crate::models::{AccountId, Transaction, TransactionId, TransactionList};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Transaction>>, BankerError> {
        self.data
            .read()
            .map_err(|e| BankerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Transaction>>, BankerError> {
        self.data
            .write()
            .map_err(|e| BankerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), BankerError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut data = self.write()?;
        *data = file_data.transactions;

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), BankerError> {
        let file_data = TransactionData {
            transactions: self.read()?.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, BankerError> {
        Ok(self.read()?.iter().find(|t| t.id == id).cloned())
    }

    /// Every transaction across all accounts, ordered by date
    pub fn get_all(&self) -> Result<TransactionList, BankerError> {
        let mut list: TransactionList = self.read()?.iter().cloned().collect();
        list.sort_by_date();
        Ok(list)
    }

    /// Transactions for one account, ordered by date
    pub fn get_by_account(&self, account_id: AccountId) -> Result<TransactionList, BankerError> {
        let mut list: TransactionList = self
            .read()?
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        list.sort_by_date();
        Ok(list)
    }

    /// Insert a new transaction or replace the one with the same id
    pub fn upsert(&self, txn: Transaction) -> Result<(), BankerError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|t| t.id == txn.id) {
            Some(existing) => *existing = txn,
            None => data.push(txn),
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, BankerError> {
        Ok(self.read()?.len())
    }
}
