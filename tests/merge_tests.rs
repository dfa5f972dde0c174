mod common;

use budget_tracker::{
    core::services::{ExportService, MergeService},
    ledger::{Expense, FixedItem, Ledger, MonthKey},
};
use chrono::NaiveDate;
use common::{setup_tracker, store_in, temp_base};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn month() -> MonthKey {
    MonthKey::new(2024, 1).unwrap()
}

#[test]
fn fixed_item_merged_twice_is_kept_once() {
    let (tracker, _base) = setup_tracker(2024, 1);
    let upload = json!({"fixedItems": [{"name": "Rent", "price": 1000}]});

    tracker.merge_value(&upload).unwrap();
    let second = tracker.merge_value(&upload).unwrap();

    assert_eq!(second.fixed_items_added, 0);
    assert_eq!(
        tracker.ledger().fixed_items,
        vec![FixedItem::new("Rent", 1000.0)]
    );
}

#[test]
fn fixed_item_match_ignores_name_case() {
    let current = Ledger {
        fixed_items: vec![FixedItem::new("Rent", 1000.0)],
        ..Ledger::for_month(month())
    };
    let outcome = MergeService::merge_into(
        current,
        &json!({"fixedItems": [{"name": "RENT", "price": 1000}, {"name": "rent", "price": 999}]}),
        today(),
        month(),
    );
    assert_eq!(
        outcome.ledger.fixed_items,
        vec![FixedItem::new("Rent", 1000.0), FixedItem::new("rent", 999.0)]
    );
}

#[test]
fn blank_fixed_item_names_are_skipped() {
    let outcome = MergeService::merge_into(
        Ledger::for_month(month()),
        &json!({"fixedItems": [{"name": "   ", "price": 5}, {"price": 1}]}),
        today(),
        month(),
    );
    assert!(outcome.ledger.fixed_items.is_empty());
    assert!(!outcome.changed());
}

#[test]
fn existing_budget_wins_over_uploaded_one() {
    let current = Ledger {
        budget: Some(500.0),
        ..Ledger::for_month(month())
    };
    let kept = MergeService::merge_into(current, &json!({"budget": 999}), today(), month());
    assert_eq!(kept.ledger.budget, Some(500.0));
    assert!(!kept.budget_adopted);

    let adopted = MergeService::merge_into(
        Ledger::for_month(month()),
        &json!({"budget": 999}),
        today(),
        month(),
    );
    assert_eq!(adopted.ledger.budget, Some(999.0));
    assert!(adopted.budget_adopted);
}

#[test]
fn expense_match_is_case_sensitive_on_name() {
    let current = Ledger {
        expenses: vec![Expense::new("2024-01-01", "Coffee", 5.0)],
        ..Ledger::for_month(month())
    };
    let outcome = MergeService::merge_into(
        current,
        &json!({"expenses": [
            {"date": "2024-01-01", "name": "coffee", "price": 5},
            {"date": "2024-01-01", "name": "Coffee", "price": "5"}
        ]}),
        today(),
        month(),
    );
    assert_eq!(
        outcome.ledger.expenses,
        vec![
            Expense::new("2024-01-01", "Coffee", 5.0),
            Expense::new("2024-01-01", "coffee", 5.0),
        ]
    );
    assert_eq!(outcome.expenses_added, 1);
}

#[test]
fn merge_never_removes_existing_entries() {
    let (tracker, _base) = setup_tracker(2024, 1);
    tracker.add_fixed_item("Phone", 20.0).unwrap();
    tracker
        .add_expense(Expense::new("2024-01-03", "Bus", 2.5))
        .unwrap();

    tracker
        .merge_value(&json!({"fixedItems": [], "expenses": [], "budget": null}))
        .unwrap();

    let ledger = tracker.ledger();
    assert_eq!(ledger.fixed_items, vec![FixedItem::new("Phone", 20.0)]);
    assert_eq!(ledger.expenses, vec![Expense::new("2024-01-03", "Bus", 2.5)]);
}

#[test]
fn stored_month_is_kept_on_merge() {
    let base = temp_base();
    let store = store_in(&base, 2024, 1);
    let outcome = MergeService::merge(&store, &json!({"currentMonth": "2023-7"})).unwrap();
    assert_eq!(outcome.ledger.current_month.as_deref(), Some("2024-1"));
}

#[test]
fn backup_round_trips_through_a_cleared_ledger() {
    let (tracker, _base) = setup_tracker(2024, 1);
    tracker.set_budget(Some(1200.0)).unwrap();
    tracker.add_fixed_item("Rent", 800.0).unwrap();
    tracker.add_fixed_item("Gym", 30.0).unwrap();
    tracker
        .add_expense(Expense::new("2024-01-04", "Groceries", 64.2))
        .unwrap();
    tracker.add_expense_from_fixed(0).unwrap();
    let before = tracker.ledger();

    let backup = ExportService::backup_document(&before, today()).unwrap();
    let uploaded: serde_json::Value = serde_json::from_str(&backup.contents).unwrap();

    let cleared = tracker.clear_all().unwrap();
    assert_eq!(cleared.budget, None);
    assert!(cleared.expenses.is_empty());

    let outcome = tracker.merge_value(&uploaded).unwrap();
    assert!(outcome.budget_adopted);
    assert_eq!(outcome.fixed_items_added, 2);
    assert_eq!(outcome.expenses_added, 2);
    assert_eq!(tracker.ledger(), before);
}
