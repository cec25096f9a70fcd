//! Account display formatting

use crate::models::Money;
use crate::services::account::AccountSummary;

/// Format accounts with balances as a table, with a total row
pub fn format_account_list(summaries: &[AccountSummary]) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.account.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>6}  {}\n",
        "Name",
        "Balance",
        "Txns",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->6}  {:-<8}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        let status = if summary.account.archived { "Archived" } else { "" };
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>6}  {}\n",
            summary.account.name,
            summary.balance.to_string(),
            summary.transaction_count,
            status,
            name_width = name_width,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.balance).sum();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "TOTAL",
        total.to_string(),
        name_width = name_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary) -> String {
    let account = &summary.account;

    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:           {}\n", account.id));
    output.push_str(&format!(
        "  Archived:     {}\n",
        if account.archived { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Balance:      {}\n", summary.balance));
    output.push_str(&format!("  Transactions: {}\n", summary.transaction_count));
    output.push_str(&format!(
        "  Created:      {}\n",
        account.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    fn summary(name: &str, balance: i64, count: usize) -> AccountSummary {
        AccountSummary {
            account: Account::new(name),
            balance: Money::from_cents(balance),
            transaction_count: count,
        }
    }

    #[test]
    fn test_format_account_list() {
        let output = format_account_list(&[
            summary("Checking", 100000, 3),
            summary("Savings", -2550, 1),
        ]);

        assert!(output.contains("Checking"));
        assert!(output.contains("$1000.00"));
        assert!(output.contains("-$25.50"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$974.50"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_account_list(&[]), "No accounts found.");
    }

    #[test]
    fn test_format_account_details() {
        let mut s = summary("Checking", 500, 2);
        s.account.archived = true;
        let output = format_account_details(&s);

        assert!(output.starts_with("Account: Checking"));
        assert!(output.contains("Archived:     Yes"));
        assert!(output.contains("Transactions: 2"));
    }
}
