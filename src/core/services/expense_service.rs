//! Direct edits to the budget, fixed items, and expense rows.
//!
//! Each helper mutates an in-memory ledger and reports whether anything changed;
//! persistence is the caller's job. Out-of-range indices are ignored.

use chrono::NaiveDate;

use crate::{
    errors::{Result, TrackerError},
    ledger::{parse_price, today_iso, Expense, FixedItem, Ledger},
};

/// Field update for a single expense row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseField {
    Date(String),
    Name(String),
    /// Raw price text; non-numeric input is stored as zero.
    Price(String),
}

pub struct ExpenseService;

impl ExpenseService {
    /// Sets or clears the monthly budget.
    pub fn set_budget(ledger: &mut Ledger, budget: Option<f64>) -> Result<()> {
        if let Some(value) = budget {
            if !value.is_finite() {
                return Err(TrackerError::InvalidInput(format!(
                    "budget `{value}` is not a finite number"
                )));
            }
        }
        ledger.budget = budget;
        Ok(())
    }

    /// Adds a fixed item unless one with the same name (any case) and price exists.
    pub fn add_fixed_item(ledger: &mut Ledger, name: &str, price: f64) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::InvalidInput(
                "fixed item name cannot be empty".into(),
            ));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(TrackerError::InvalidInput(format!(
                "fixed item price `{price}` must be a non-negative number"
            )));
        }
        if ledger.has_fixed_item(name, price) {
            return Ok(false);
        }
        ledger.fixed_items.push(FixedItem::new(name, price));
        Ok(true)
    }

    pub fn remove_fixed_item(ledger: &mut Ledger, index: usize) -> Option<FixedItem> {
        (index < ledger.fixed_items.len()).then(|| ledger.fixed_items.remove(index))
    }

    /// Appends a row as given. Direct entries are never deduplicated.
    pub fn add_expense(ledger: &mut Ledger, expense: Expense) {
        ledger.expenses.push(expense);
    }

    /// Appends an empty row dated today.
    pub fn add_blank_expense(ledger: &mut Ledger, today: NaiveDate) {
        Self::add_expense(ledger, Expense::new(today_iso(today), "", 0.0));
    }

    /// Logs the fixed item at `index` as an expense dated today.
    pub fn add_expense_from_fixed(ledger: &mut Ledger, index: usize, today: NaiveDate) -> bool {
        let Some(item) = ledger.fixed_items.get(index).cloned() else {
            return false;
        };
        Self::add_expense(ledger, Expense::new(today_iso(today), item.name, item.price));
        true
    }

    pub fn edit_expense(ledger: &mut Ledger, index: usize, field: ExpenseField) -> bool {
        let Some(row) = ledger.expenses.get_mut(index) else {
            return false;
        };
        match field {
            ExpenseField::Date(date) => row.date = date,
            ExpenseField::Name(name) => row.name = name,
            ExpenseField::Price(text) => row.price = parse_price(&text),
        }
        true
    }

    pub fn delete_expense(ledger: &mut Ledger, index: usize) -> Option<Expense> {
        (index < ledger.expenses.len()).then(|| ledger.expenses.remove(index))
    }

    /// Empties the month's expenses, keeping budget and fixed items.
    pub fn clear_month(ledger: &mut Ledger) -> usize {
        let removed = ledger.expenses.len();
        ledger.expenses.clear();
        removed
    }
}
