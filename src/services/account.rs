//! Account service
//!
//! CRUD over accounts plus computed balances.

use crate::error::{BankerError, BankerResult};
use crate::models::{Account, AccountId, Money};
use crate::storage::Storage;

/// An account with its computed balance
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    pub balance: Money,
    pub transaction_count: usize,
}

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create and persist a new account
    pub fn create(&self, name: &str) -> BankerResult<Account> {
        let name = name.trim();
        let account = Account::new(name);
        account.validate().map_err(BankerError::Validation)?;

        if self.storage.accounts.name_exists(name)? {
            return Err(BankerError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        tracing::info!(account = %account.name, id = %account.id, "created account");
        Ok(account)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> BankerResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find) but a missing account is an error
    pub fn require(&self, identifier: &str) -> BankerResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| BankerError::account_not_found(identifier))
    }

    pub fn list(&self, include_archived: bool) -> BankerResult<Vec<Account>> {
        if include_archived {
            self.storage.accounts.get_all()
        } else {
            self.storage.accounts.get_active()
        }
    }

    pub fn list_with_balances(&self, include_archived: bool) -> BankerResult<Vec<AccountSummary>> {
        self.list(include_archived)?
            .into_iter()
            .map(|account| self.get_summary(account))
            .collect()
    }

    pub fn get_summary(&self, account: Account) -> BankerResult<AccountSummary> {
        let transactions = self.storage.transactions.get_by_account(account.id)?;
        Ok(AccountSummary {
            balance: transactions.total(),
            transaction_count: transactions.len(),
            account,
        })
    }

    /// Archive an account; its transactions are kept
    pub fn archive(&self, id: AccountId) -> BankerResult<Account> {
        let mut account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| BankerError::account_not_found(id.to_string()))?;

        if account.archived {
            return Err(BankerError::Validation(format!(
                "Account '{}' is already archived",
                account.name
            )));
        }

        account.archived = true;
        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BankerPaths;
    use crate::models::Transaction;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service.create("  Checking ").unwrap();
        assert_eq!(account.name, "Checking");

        assert_eq!(service.find("checking").unwrap().unwrap().id, account.id);
        assert_eq!(
            service.find(&account.id.as_uuid().to_string()).unwrap().unwrap().id,
            account.id
        );
        assert!(service.find("Nope").unwrap().is_none());
        assert!(service.require("Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_rejects_duplicates_and_empty_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create("Checking").unwrap();
        assert!(matches!(
            service.create("CHECKING"),
            Err(BankerError::Duplicate { .. })
        ));
        assert!(service.create("  ").unwrap_err().is_validation());
    }

    #[test]
    fn test_summary_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        let account = service.create("Checking").unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        for cents in [10_000, -2_500] {
            storage
                .transactions
                .upsert(Transaction::new(account.id, day, Money::from_cents(cents), ""))
                .unwrap();
        }

        let summaries = service.list_with_balances(false).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].balance, Money::from_cents(7_500));
        assert_eq!(summaries[0].transaction_count, 2);
    }

    #[test]
    fn test_archive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);
        let account = service.create("Old").unwrap();

        service.archive(account.id).unwrap();
        assert!(service.list(false).unwrap().is_empty());
        assert_eq!(service.list(true).unwrap().len(), 1);
        assert!(service.archive(account.id).unwrap_err().is_validation());
    }
}
