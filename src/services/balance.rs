//! Balance history
//!
//! `BalanceController` is the domain handle plot panels are created with. It
//! owns the transactions being plotted and turns them into running totals,
//! one per time bucket.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::{Money, TransactionList};

/// Size of one time bucket in a balance series
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Axis label for the bucket unit
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::Daily => "Days",
            Self::Weekly => "Weeks",
            Self::Monthly => "Months",
        }
    }

    /// First date covered by bucket `index` of a series starting at `start`
    pub fn bucket_start(&self, start: NaiveDate, index: usize) -> NaiveDate {
        let index = index as u64;
        let date = match self {
            Self::Daily => start.checked_add_days(Days::new(index)),
            Self::Weekly => start.checked_add_days(Days::new(index * 7)),
            Self::Monthly => start
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(index as u32))),
        };
        date.unwrap_or(NaiveDate::MAX)
    }

    /// Last date (inclusive) covered by bucket `index`
    pub fn bucket_end(&self, start: NaiveDate, index: usize) -> NaiveDate {
        let date = match self {
            Self::Daily => Some(self.bucket_start(start, index)),
            Self::Weekly => self
                .bucket_start(start, index)
                .checked_add_days(Days::new(6)),
            Self::Monthly => self
                .bucket_start(start, index + 1)
                .checked_sub_days(Days::new(1)),
        };
        date.unwrap_or(NaiveDate::MAX)
    }
}

/// Running balances, one per bucket, starting at `start`
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSeries {
    pub start: Option<NaiveDate>,
    pub granularity: Granularity,
    pub totals: Vec<f64>,
}

impl BalanceSeries {
    pub fn empty(granularity: Granularity) -> Self {
        Self {
            start: None,
            granularity,
            totals: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Supplies balance data and formatting to plot panels
#[derive(Debug, Clone)]
pub struct BalanceController {
    transactions: TransactionList,
    currency_symbol: String,
    label: String,
}

impl BalanceController {
    pub fn new(transactions: TransactionList, settings: &Settings) -> Self {
        Self {
            transactions,
            currency_symbol: settings.currency_symbol.clone(),
            label: "All accounts".to_string(),
        }
    }

    /// Name shown in panel titles (usually the account name)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Running balance at the end of each bucket
    ///
    /// Buckets start at the first transaction date and run through `end`
    /// (default: the last transaction date). An `end` before the first
    /// transaction is clamped to it; transactions after `end` are ignored.
    pub fn balance_history(
        &self,
        granularity: Granularity,
        end: Option<NaiveDate>,
    ) -> BalanceSeries {
        let mut ordered = self.transactions.clone();
        ordered.sort_by_date();

        let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
            return BalanceSeries::empty(granularity);
        };
        let start = first.date;
        let end = end.unwrap_or(last.date).max(start);

        let mut totals = Vec::new();
        let mut running = Money::zero();
        let mut pending = ordered.iter().peekable();
        let mut index = 0;

        loop {
            let bucket_end = granularity.bucket_end(start, index);
            while let Some(txn) = pending.next_if(|txn| txn.date <= bucket_end && txn.date <= end) {
                running += txn.amount;
            }
            totals.push(running.to_major_units());

            if bucket_end >= end {
                break;
            }
            index += 1;
        }

        tracing::debug!(
            label = %self.label,
            buckets = totals.len(),
            ?granularity,
            "computed balance history"
        );

        BalanceSeries {
            start: Some(start),
            granularity,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Transaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller(entries: &[(NaiveDate, i64)]) -> BalanceController {
        let account = AccountId::new();
        let list = entries
            .iter()
            .map(|(d, cents)| Transaction::new(account, *d, Money::from_cents(*cents), "x"))
            .collect();
        BalanceController::new(list, &Settings::default())
    }

    #[test]
    fn test_no_transactions_gives_empty_series() {
        let series = controller(&[]).balance_history(Granularity::Daily, None);
        assert!(series.is_empty());
        assert_eq!(series.start, None);
    }

    #[test]
    fn test_daily_running_balance() {
        let c = controller(&[
            (date(2024, 1, 3), 500),
            (date(2024, 1, 1), 1000),
            (date(2024, 1, 3), -250),
        ]);
        let series = c.balance_history(Granularity::Daily, None);

        assert_eq!(series.start, Some(date(2024, 1, 1)));
        assert_eq!(series.totals, vec![10.0, 10.0, 12.5]);
    }

    #[test]
    fn test_end_extends_and_truncates() {
        let c = controller(&[(date(2024, 1, 1), 100), (date(2024, 1, 5), 100)]);

        let extended = c.balance_history(Granularity::Daily, Some(date(2024, 1, 7)));
        assert_eq!(extended.totals.len(), 7);
        assert_eq!(extended.totals.last(), Some(&2.0));

        let truncated = c.balance_history(Granularity::Daily, Some(date(2024, 1, 2)));
        assert_eq!(truncated.totals, vec![1.0, 1.0]);

        let clamped = c.balance_history(Granularity::Daily, Some(date(2023, 12, 1)));
        assert_eq!(clamped.totals, vec![1.0]);
    }

    #[test]
    fn test_weekly_buckets() {
        let c = controller(&[
            (date(2024, 1, 1), 100),
            (date(2024, 1, 7), 100),
            (date(2024, 1, 8), 100),
            (date(2024, 1, 20), -50),
        ]);
        let series = c.balance_history(Granularity::Weekly, None);
        assert_eq!(series.totals, vec![2.0, 3.0, 2.5]);
    }

    #[test]
    fn test_monthly_buckets_follow_calendar() {
        let c = controller(&[
            (date(2024, 1, 31), 1000),
            (date(2024, 2, 29), 500),
            (date(2024, 4, 1), -300),
        ]);
        let series = c.balance_history(Granularity::Monthly, None);

        assert_eq!(series.totals, vec![10.0, 15.0, 15.0, 12.0]);
        assert_eq!(Granularity::Monthly.bucket_start(date(2024, 1, 31), 1), date(2024, 2, 1));
        assert_eq!(Granularity::Monthly.bucket_end(date(2024, 1, 31), 1), date(2024, 2, 29));
    }

    #[test]
    fn test_settings_and_label() {
        let mut settings = Settings::default();
        settings.currency_symbol = "£".into();
        let c = BalanceController::new(TransactionList::new(), &settings).with_label("Savings");

        assert_eq!(c.currency_symbol(), "£");
        assert_eq!(c.label(), "Savings");
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let huge = Money::parse("90000000000000000.00").unwrap();
        let c = controller(&[(date(2024, 1, 1), huge.cents()), (date(2024, 1, 1), huge.cents())]);

        let series = c.balance_history(Granularity::Daily, None);
        assert_eq!(series.totals, vec![Money::from_cents(i64::MAX).to_major_units()]);
        assert_eq!(c.transactions.total(), Money::from_cents(i64::MAX));
    }
}
