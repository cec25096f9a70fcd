//! Account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::AccountId;

/// A named account that transactions are booked against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    /// Account name (e.g., "Checking")
    pub name: String,

    /// Archived accounts are hidden from listings but keep their history
    #[serde(default)]
    pub archived: bool,

    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            archived: false,
            created_at: Utc::now(),
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Account name cannot be empty".into());
        }
        if self.name.len() > 100 {
            return Err(format!(
                "Account name too long ({} chars, max 100)",
                self.name.len()
            ));
        }
        Ok(())
    }
}
