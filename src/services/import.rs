//! CSV import service
//!
//! Parses bank CSV exports into transactions, previews them against what is
//! already recorded, and imports the rows that are new.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::error::{BankerError, BankerResult};
use crate::models::{AccountId, Money, Transaction, TransactionList};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Fallback date formats tried after the configured one
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y",
];

/// Which columns hold what
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    pub description_column: Option<usize>,
    /// Preferred date format (strftime)
    pub date_format: String,
    pub has_header: bool,
    pub delimiter: u8,
    /// Flip signs for exports that list purchases as positive
    pub invert_amounts: bool,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 2,
            description_column: Some(1),
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            delimiter: b',',
            invert_amounts: false,
        }
    }
}

impl ColumnMapping {
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_invert_amounts(mut self, invert: bool) -> Self {
        self.invert_amounts = invert;
        self
    }

    /// Guess columns from a header row; unrecognised headers keep defaults
    ///
    /// A first cell that parses as a date (with `date_format` or a common
    /// bank format) means the file has no header row.
    pub fn detect(headers: &StringRecord, date_format: &str) -> Self {
        let mut mapping = Self::default().with_date_format(date_format);

        if headers
            .iter()
            .next()
            .is_some_and(|cell| parse_date(cell.trim(), date_format).is_some())
        {
            mapping.has_header = false;
            return mapping;
        }

        let mut description = None;
        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();
            if h.contains("date") || h.contains("posted") {
                mapping.date_column = idx;
            } else if h.contains("amount") || h.contains("value") {
                mapping.amount_column = idx;
            } else if description.is_none()
                && (h.contains("description")
                    || h.contains("payee")
                    || h.contains("memo")
                    || h.contains("name"))
            {
                description = Some(idx);
            }
        }
        if description.is_some() {
            mapping.description_column = description;
        }
        mapping
    }
}

/// One CSV data row
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// 1-based line number in the file
    pub line: usize,
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
}

/// Whether a previewed row would be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    New,
    Duplicate,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    pub line: usize,
    pub transaction: Option<Transaction>,
    pub status: ImportStatus,
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub errors: Vec<(usize, String)>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse CSV data. Row-level problems are reported per row rather than
    /// failing the whole file.
    pub fn parse<R: Read>(
        &self,
        input: R,
        mapping: Option<ColumnMapping>,
        date_format: &str,
    ) -> BankerResult<Vec<Result<ParsedRow, (usize, String)>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut records = reader.records();
        let first = match records.next() {
            Some(record) => record.map_err(|e| BankerError::Import(e.to_string()))?,
            None => return Ok(Vec::new()),
        };

        let mapping = mapping
            .unwrap_or_else(|| ColumnMapping::detect(&first, date_format));

        let mut rows = Vec::new();
        if !mapping.has_header {
            rows.push(parse_record(&first, 1, &mapping));
        }
        for (idx, record) in records.enumerate() {
            let line = idx + 2;
            rows.push(match record {
                Ok(record) => parse_record(&record, line, &mapping),
                Err(e) => Err((line, format!("Unreadable CSV record: {}", e))),
            });
        }
        Ok(rows)
    }

    /// Classify parsed rows against the account's existing transactions
    ///
    /// Each existing transaction can absorb at most one imported row, so a
    /// file with two identical purchases against one recorded purchase
    /// imports the second.
    pub fn preview(
        &self,
        account_id: AccountId,
        rows: Vec<Result<ParsedRow, (usize, String)>>,
    ) -> BankerResult<Vec<ImportPreviewEntry>> {
        let existing = self.storage.transactions.get_by_account(account_id)?;
        let mut matched = vec![false; existing.len()];

        Ok(rows
            .into_iter()
            .map(|row| match row {
                Ok(row) => {
                    let txn = Transaction::new(account_id, row.date, row.amount, row.description);
                    let duplicate = existing
                        .iter()
                        .enumerate()
                        .find(|(i, e)| !matched[*i] && **e == txn)
                        .map(|(i, _)| i);
                    let status = match duplicate {
                        Some(i) => {
                            matched[i] = true;
                            ImportStatus::Duplicate
                        }
                        None => ImportStatus::New,
                    };
                    ImportPreviewEntry {
                        line: row.line,
                        transaction: Some(txn),
                        status,
                    }
                }
                Err((line, message)) => ImportPreviewEntry {
                    line,
                    transaction: None,
                    status: ImportStatus::Error(message),
                },
            })
            .collect())
    }

    /// Import the new rows of a preview
    pub fn import(&self, preview: Vec<ImportPreviewEntry>) -> BankerResult<ImportResult> {
        let mut result = ImportResult::default();
        let mut fresh = TransactionList::new();

        for entry in preview {
            match (entry.status, entry.transaction) {
                (ImportStatus::New, Some(txn)) => fresh.push(txn),
                (ImportStatus::Duplicate, _) => result.duplicates_skipped += 1,
                (ImportStatus::Error(message), _) => result.errors.push((entry.line, message)),
                (ImportStatus::New, None) => {}
            }
        }

        if !fresh.is_empty() {
            result.imported = TransactionService::new(self.storage).add_batch(fresh)?;
        }

        tracing::info!(
            imported = result.imported,
            duplicates = result.duplicates_skipped,
            errors = result.errors.len(),
            "CSV import finished"
        );
        Ok(result)
    }

    /// Parse, preview and import a CSV file in one go
    pub fn import_file(
        &self,
        account_id: AccountId,
        path: &Path,
        date_format: &str,
        invert_amounts: bool,
    ) -> BankerResult<ImportResult> {
        let file = std::fs::File::open(path)
            .map_err(|e| BankerError::Import(format!("Cannot open {}: {}", path.display(), e)))?;

        let mut rows = self.parse(file, None, date_format)?;
        if invert_amounts {
            for row in rows.iter_mut().flatten() {
                row.amount = -row.amount;
            }
        }

        let preview = self.preview(account_id, rows)?;
        self.import(preview)
    }
}

fn parse_record(
    record: &StringRecord,
    line: usize,
    mapping: &ColumnMapping,
) -> Result<ParsedRow, (usize, String)> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .map(str::trim)
            .ok_or_else(|| (line, format!("Missing {} column", name)))
    };

    let date_str = field(mapping.date_column, "date")?;
    let date = parse_date(date_str, &mapping.date_format)
        .ok_or_else(|| (line, format!("Could not parse date: '{}'", date_str)))?;

    let amount_str = field(mapping.amount_column, "amount")?;
    let mut amount = Money::parse(amount_str).map_err(|e| (line, e.to_string()))?;
    if mapping.invert_amounts {
        amount = -amount;
    }

    let description = mapping
        .description_column
        .and_then(|idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Ok(ParsedRow {
        line,
        date,
        amount,
        description,
    })
}

/// Parse a date with `preferred` first, then the common bank formats
pub fn parse_date(s: &str, preferred: &str) -> Option<NaiveDate> {
    std::iter::once(preferred)
        .chain(DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
