use serde::{Deserialize, Serialize};

use super::month_key::MonthKey;

/// Reusable expense template that can be added to the month with one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

impl FixedItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Template identity: case-insensitive name and exact price.
    pub fn matches(&self, name: &str, price: f64) -> bool {
        self.price == price && self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A single logged transaction for the active month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

impl Expense {
    pub fn new(date: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            price,
        }
    }

    /// Row identity used when importing: exact date, case-sensitive name, exact price.
    pub fn same_entry(&self, other: &Expense) -> bool {
        self.date == other.date && self.name == other.name && self.price == other.price
    }
}

/// Root persisted aggregate for the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub fixed_items: Vec<FixedItem>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub current_month: Option<String>,
}

impl Ledger {
    /// Empty ledger stamped with the given period.
    pub fn for_month(month: MonthKey) -> Self {
        Self {
            current_month: Some(month.to_string()),
            ..Self::default()
        }
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.price).sum()
    }

    /// Budget minus spending, or `None` while no budget is set.
    pub fn remaining(&self) -> Option<f64> {
        self.budget.map(|budget| budget - self.total_expenses())
    }

    pub fn has_fixed_item(&self, name: &str, price: f64) -> bool {
        self.fixed_items.iter().any(|item| item.matches(name, price))
    }

    pub fn has_expense(&self, expense: &Expense) -> bool {
        self.expenses.iter().any(|existing| existing.same_entry(expense))
    }

    /// Parsed period marker, if one is stored and well formed.
    pub fn month_key(&self) -> Option<MonthKey> {
        self.current_month.as_deref().and_then(MonthKey::parse)
    }

    pub fn ensure_month(&mut self, fallback: MonthKey) {
        if self.current_month.is_none() {
            self.current_month = Some(fallback.to_string());
        }
    }
}
