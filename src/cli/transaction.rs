//! Transaction CLI commands

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::format_transaction_register;
use crate::error::{BankerError, BankerResult};
use crate::models::Money;
use crate::services::import::parse_date;
use crate::services::{AccountService, ImportService, ImportStatus, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Account name or ID
        account: String,
        /// Amount (e.g. "-50.00" for outflow, "100.00" for inflow)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description
        description: Option<String>,
        /// Transaction date, defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions with a running balance
    List {
        /// Only this account (name or ID)
        #[arg(short, long)]
        account: Option<String>,
        /// Show only the most recent N transactions
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Import transactions from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
        /// Target account name or ID
        #[arg(short, long)]
        account: String,
        /// Date format of the file (strftime), tried before the usual formats
        #[arg(long)]
        date_format: Option<String>,
        /// Flip amount signs (for exports listing purchases as positive)
        #[arg(long)]
        invert: bool,
        /// Show what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BankerResult<()> {
    let accounts = AccountService::new(storage);
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            description,
            date,
        } => {
            let account = accounts.require(&account)?;
            let amount = Money::parse(&amount)
                .map_err(|e| BankerError::Validation(e.to_string()))?;
            let date = match date {
                Some(date) => parse_cli_date(&date, settings)?,
                None => Local::now().date_naive(),
            };

            let txn = service.add(account.id, date, amount, description.as_deref().unwrap_or(""))?;
            println!(
                "Recorded {} on {} in '{}'",
                txn.amount,
                txn.date.format(&settings.date_format),
                account.name
            );
        }

        TransactionCommands::List { account, limit } => {
            let account_id = match account {
                Some(name) => Some(accounts.require(&name)?.id),
                None => None,
            };
            let list = service.list(account_id)?;

            let skip = list.len().saturating_sub(limit);
            let opening: Money = list.iter().take(skip).map(|t| t.amount).sum();
            print!("{}", format_transaction_register(list.iter().skip(skip), opening));
        }

        TransactionCommands::Import {
            file,
            account,
            date_format,
            invert,
            dry_run,
        } => {
            let account = accounts.require(&account)?;
            let importer = ImportService::new(storage);
            let date_format = date_format.unwrap_or_else(|| settings.date_format.clone());

            if !dry_run {
                let result = importer.import_file(account.id, &file, &date_format, invert)?;
                println!("Imported {} transaction(s) into '{}'", result.imported, account.name);
                if result.duplicates_skipped > 0 {
                    println!("  Skipped {} duplicate(s)", result.duplicates_skipped);
                }
                for (line, message) in &result.errors {
                    println!("  Line {}: {}", line, message);
                }
                return Ok(());
            }

            let input = std::fs::File::open(&file).map_err(|e| {
                BankerError::Import(format!("Cannot open {}: {}", file.display(), e))
            })?;
            let mut rows = importer.parse(input, None, &date_format)?;
            if invert {
                for row in rows.iter_mut().flatten() {
                    row.amount = -row.amount;
                }
            }
            let preview = importer.preview(account.id, rows)?;

            println!("Import preview for '{}'", account.name);
            println!("{}", "=".repeat(40));
            for entry in &preview {
                let status = match &entry.status {
                    ImportStatus::New => "new".to_string(),
                    ImportStatus::Duplicate => "duplicate".to_string(),
                    ImportStatus::Error(message) => format!("error: {}", message),
                };
                match &entry.transaction {
                    Some(txn) => println!(
                        "  {:>4}  {}  {:>12}  {:30}  {}",
                        entry.line,
                        txn.date.format("%Y-%m-%d"),
                        txn.amount.to_string(),
                        txn.description,
                        status
                    ),
                    None => println!("  {:>4}  {}", entry.line, status),
                }
            }
        }
    }

    Ok(())
}

fn parse_cli_date(s: &str, settings: &Settings) -> BankerResult<NaiveDate> {
    parse_date(s.trim(), &settings.date_format)
        .ok_or_else(|| BankerError::Validation(format!("Invalid date: '{}'", s)))
}
