//! Backup and month export documents, and reading import files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::{
    errors::{Result, TrackerError},
    ledger::{Expense, FixedItem, Ledger, MonthKey},
    storage::write_atomic,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Full ledger, named after today's date.
    Backup,
    /// The active month's state, named after the month key.
    Month,
}

/// A serialized export ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthSnapshot<'a> {
    budget: Option<f64>,
    fixed_items: &'a [FixedItem],
    expenses: &'a [Expense],
    current_month: String,
}

pub struct ExportService;

impl ExportService {
    pub fn document(
        kind: ExportKind,
        ledger: &Ledger,
        today: NaiveDate,
        month: MonthKey,
    ) -> Result<ExportDocument> {
        match kind {
            ExportKind::Backup => Self::backup_document(ledger, today),
            ExportKind::Month => Self::month_document(ledger, month),
        }
    }

    pub fn backup_document(ledger: &Ledger, today: NaiveDate) -> Result<ExportDocument> {
        Ok(ExportDocument {
            file_name: format!("backup_{}.json", today.format("%Y-%m-%d")),
            contents: serde_json::to_string_pretty(ledger)?,
        })
    }

    /// Month export; falls back to `month` when the ledger carries no period.
    pub fn month_document(ledger: &Ledger, month: MonthKey) -> Result<ExportDocument> {
        let current_month = ledger
            .current_month
            .clone()
            .unwrap_or_else(|| month.to_string());
        let snapshot = MonthSnapshot {
            budget: ledger.budget,
            fixed_items: &ledger.fixed_items,
            expenses: &ledger.expenses,
            current_month,
        };
        Ok(ExportDocument {
            file_name: format!("month_{}.json", sanitize_file_component(&snapshot.current_month)),
            contents: serde_json::to_string_pretty(&snapshot)?,
        })
    }

    /// Writes the document into `dir`, returning the final path.
    pub fn write_document(document: &ExportDocument, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&document.file_name);
        write_atomic(&path, &document.contents)?;
        Ok(path)
    }

    /// Reads an import file in full. Unreadable files and invalid JSON are
    /// reported as import errors so callers can abort before touching storage.
    pub fn read_import(path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path).map_err(|err| {
            TrackerError::Import(format!("could not read `{}`: {err}", path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            TrackerError::Import(format!("could not parse JSON in `{}`: {err}", path.display()))
        })
    }
}

fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
