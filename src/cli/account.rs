//! Account CLI commands

use clap::Subcommand;

use crate::display::account::{format_account_details, format_account_list};
use crate::error::BankerResult;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
    },
    /// List accounts with balances
    List {
        /// Include archived accounts
        #[arg(short, long)]
        all: bool,
    },
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Archive an account
    Archive {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> BankerResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create { name } => {
            let account = service.create(&name)?;
            println!("Created account: {}", account.name);
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { all } => {
            let summaries = service.list_with_balances(all)?;
            print!("{}", format_account_list(&summaries));
        }

        AccountCommands::Show { account } => {
            let found = service.require(&account)?;
            let summary = service.get_summary(found)?;
            print!("{}", format_account_details(&summary));
        }

        AccountCommands::Archive { account } => {
            let found = service.require(&account)?;
            let archived = service.archive(found.id)?;
            println!("Archived account: {}", archived.name);
        }
    }

    Ok(())
}
