//! Storage layer for banker
//!
//! JSON file storage with atomic writes and automatic directory creation.

pub mod accounts;
pub mod file_io;
pub mod transactions;

pub use accounts::AccountRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::config::paths::BankerPaths;
use crate::error::BankerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: BankerPaths) -> Result<Self, BankerError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
        })
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BankerError> {
        self.accounts.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BankerError> {
        self.accounts.save()?;
        self.transactions.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation_and_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        assert!(temp_dir.path().join("data").exists());

        storage.accounts.upsert(Account::new("Checking")).unwrap();
        storage.save_all().unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.accounts.count().unwrap(), 1);
        assert_eq!(reloaded.transactions.count().unwrap(), 0);
    }
}
