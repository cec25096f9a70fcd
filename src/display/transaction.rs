//! Transaction register formatting

use crate::models::{Money, Transaction};

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, balance: Money) -> String {
    format!(
        "{} {:30} {:>12} {:>12}",
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.description, 30),
        txn.amount.to_string(),
        balance.to_string()
    )
}

/// Format transactions as a register with a running balance column
///
/// Rows are printed in the order given; the balance column starts from
/// `opening`.
pub fn format_transaction_register<'a, I>(transactions: I, opening: Money) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows = String::new();
    let mut balance = opening;
    for txn in transactions {
        balance += txn.amount;
        rows.push_str(&format_transaction_row(txn, balance));
        rows.push('\n');
    }

    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:10} {:30} {:>12} {:>12}\n",
        "Date", "Description", "Amount", "Balance"
    );
    output.push_str(&"-".repeat(67));
    output.push('\n');
    output.push_str(&rows);
    output
}

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}
