//! Reconciles an uploaded snapshot into the persisted ledger.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::{
    errors::Result,
    ledger::{normalize, Expense, FixedItem, Ledger, MonthKey},
    storage::LedgerStore,
};

/// Result of a merge: the persisted ledger plus what the upload contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub ledger: Ledger,
    pub budget_adopted: bool,
    pub fixed_items_added: usize,
    pub expenses_added: usize,
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        self.budget_adopted || self.fixed_items_added > 0 || self.expenses_added > 0
    }
}

/// Append-only merge: existing entries are never removed or modified.
pub struct MergeService;

impl MergeService {
    /// Loads the current ledger, merges `uploaded` into it, and persists the result.
    pub fn merge(store: &LedgerStore, uploaded: &Value) -> Result<MergeOutcome> {
        let current = store.load();
        let clock = store.clock();
        let mut outcome = Self::merge_into(current, uploaded, clock.today(), clock.month_key());
        outcome.ledger = store.save(&outcome.ledger)?;
        info!(
            budget_adopted = outcome.budget_adopted,
            fixed_items_added = outcome.fixed_items_added,
            expenses_added = outcome.expenses_added,
            "merged uploaded snapshot"
        );
        Ok(outcome)
    }

    /// Pure merge step.
    ///
    /// The budget is adopted only while the current one is unset. Fixed items match
    /// on case-insensitive name and price; expenses match on date, exact name and
    /// price. The two rules differ on purpose and imports depend on it.
    pub fn merge_into(
        current: Ledger,
        uploaded: &Value,
        today: NaiveDate,
        month: MonthKey,
    ) -> MergeOutcome {
        let upload = normalize(uploaded, today);
        let mut merged = current;

        let budget_adopted = merged.budget.is_none() && upload.budget.is_some();
        if budget_adopted {
            merged.budget = upload.budget;
        }

        let mut fixed_items_added = 0;
        for item in upload.fixed_items {
            let name = item.name.trim();
            if name.is_empty() || merged.has_fixed_item(name, item.price) {
                continue;
            }
            merged.fixed_items.push(FixedItem::new(name, item.price));
            fixed_items_added += 1;
        }

        let mut expenses_added = 0;
        for row in upload.expenses {
            let expense = Expense::new(row.date, row.name, row.price);
            if merged.has_expense(&expense) {
                continue;
            }
            merged.expenses.push(expense);
            expenses_added += 1;
        }

        if merged.current_month.is_none() {
            merged.current_month = upload.current_month.or_else(|| Some(month.to_string()));
        }

        MergeOutcome {
            ledger: merged,
            budget_adopted,
            fixed_items_added,
            expenses_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn month() -> MonthKey {
        MonthKey::from_date(today())
    }

    #[test]
    fn trims_names_and_skips_blank_fixed_items() {
        let upload = json!({
            "fixedItems": [
                { "name": "  Internet ", "price": 40 },
                { "name": "   ", "price": 10 },
                { "price": 10 }
            ]
        });
        let outcome = MergeService::merge_into(Ledger::default(), &upload, today(), month());
        assert_eq!(
            outcome.ledger.fixed_items,
            vec![FixedItem::new("Internet", 40.0)]
        );
        assert_eq!(outcome.fixed_items_added, 1);
    }

    #[test]
    fn same_name_different_price_is_a_new_template() {
        let mut current = Ledger::default();
        current.fixed_items.push(FixedItem::new("Rent", 1000.0));
        let upload = json!({ "fixedItems": [{ "name": "rent", "price": 1100 }] });
        let outcome = MergeService::merge_into(current, &upload, today(), month());
        assert_eq!(outcome.ledger.fixed_items.len(), 2);
    }

    #[test]
    fn duplicates_inside_upload_collapse() {
        let upload = json!({
            "expenses": [
                { "date": "2024-01-03", "name": "Bus", "price": 2.5 },
                { "date": "2024-01-03", "name": "Bus", "price": 2.5 }
            ]
        });
        let outcome = MergeService::merge_into(Ledger::default(), &upload, today(), month());
        assert_eq!(outcome.expenses_added, 1);
    }

    #[test]
    fn month_prefers_current_then_upload_then_clock() {
        let upload = json!({ "currentMonth": "2023-7" });

        let current = Ledger::for_month(MonthKey::new(2024, 1).unwrap());
        let kept = MergeService::merge_into(current, &upload, today(), month());
        assert_eq!(kept.ledger.current_month.as_deref(), Some("2024-1"));

        let adopted = MergeService::merge_into(Ledger::default(), &upload, today(), month());
        assert_eq!(adopted.ledger.current_month.as_deref(), Some("2023-7"));

        let defaulted = MergeService::merge_into(Ledger::default(), &json!({}), today(), month());
        assert_eq!(defaulted.ledger.current_month.as_deref(), Some("2024-1"));
        assert!(!defaulted.changed());
    }
}
