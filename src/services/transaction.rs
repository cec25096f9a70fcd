//! Transaction service

use chrono::NaiveDate;

use crate::error::{BankerError, BankerResult};
use crate::models::{AccountId, Money, Transaction, TransactionList};
use crate::storage::Storage;

/// Service for recording and listing transactions
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction against an existing account
    pub fn add(
        &self,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        description: &str,
    ) -> BankerResult<Transaction> {
        if self.storage.accounts.get(account_id)?.is_none() {
            return Err(BankerError::account_not_found(account_id.to_string()));
        }
        if amount.is_zero() {
            return Err(BankerError::Validation(
                "Transaction amount cannot be zero".into(),
            ));
        }

        let txn = Transaction::new(account_id, date, amount, description.trim());
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, amount = %txn.amount, "recorded transaction");
        Ok(txn)
    }

    /// Add several transactions in one save
    pub fn add_batch(&self, transactions: TransactionList) -> BankerResult<usize> {
        let count = transactions.len();
        for txn in transactions {
            self.storage.transactions.upsert(txn)?;
        }
        self.storage.transactions.save()?;
        Ok(count)
    }

    /// Transactions for one account (or all accounts), ordered by date
    pub fn list(&self, account_id: Option<AccountId>) -> BankerResult<TransactionList> {
        match account_id {
            Some(id) => self.storage.transactions.get_by_account(id),
            None => self.storage.transactions.get_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BankerPaths;
    use crate::models::Account;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, AccountId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let account = Account::new("Checking");
        let id = account.id;
        storage.accounts.upsert(account).unwrap();
        (temp_dir, storage, id)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let (_temp_dir, storage, account_id) = setup();
        let service = TransactionService::new(&storage);

        let later = service.add(account_id, day(9), Money::from_cents(-1299), " Books ").unwrap();
        let earlier = service.add(account_id, day(2), Money::from_cents(50_000), "Salary").unwrap();
        assert_eq!(later.description, "Books");

        let listed = service.list(Some(account_id)).unwrap();
        assert_eq!(listed, vec![earlier, later]);
        assert_eq!(service.list(None).unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_unknown_account_and_zero() {
        let (_temp_dir, storage, account_id) = setup();
        let service = TransactionService::new(&storage);

        let err = service
            .add(AccountId::new(), day(1), Money::from_cents(100), "")
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service.add(account_id, day(1), Money::zero(), "").unwrap_err();
        assert!(err.is_validation());
    }
}
