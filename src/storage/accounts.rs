//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BankerError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<AccountId, Account>>, BankerError> {
        self.data
            .read()
            .map_err(|e| BankerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<AccountId, Account>>, BankerError> {
        self.data
            .write()
            .map_err(|e| BankerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), BankerError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        tracing::debug!(count = data.len(), "loaded accounts");
        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), BankerError> {
        let file_data = AccountData {
            accounts: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: AccountId) -> Result<Option<Account>, BankerError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All accounts, sorted by name
    pub fn get_all(&self) -> Result<Vec<Account>, BankerError> {
        let mut accounts: Vec<_> = self.read()?.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(accounts)
    }

    /// Get all active (non-archived) accounts
    pub fn get_active(&self) -> Result<Vec<Account>, BankerError> {
        Ok(self.get_all()?.into_iter().filter(|a| !a.archived).collect())
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, BankerError> {
        let name_lower = name.to_lowercase();
        Ok(self
            .read()?
            .values()
            .find(|a| a.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn upsert(&self, account: Account) -> Result<(), BankerError> {
        self.write()?.insert(account.id, account);
        Ok(())
    }

    pub fn name_exists(&self, name: &str) -> Result<bool, BankerError> {
        Ok(self.get_by_name(name)?.is_some())
    }

    pub fn count(&self) -> Result<usize, BankerError> {
        Ok(self.read()?.len())
    }
}
