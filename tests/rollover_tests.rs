mod common;

use budget_tracker::{
    core::{services::RolloverOutcome, Tracker},
    ledger::{Expense, FixedItem, Ledger},
};
use common::{store_in, temp_base};

fn january() -> Ledger {
    Ledger {
        budget: Some(1000.0),
        fixed_items: vec![FixedItem::new("Rent", 700.0)],
        expenses: vec![
            Expense::new("2024-01-03", "Groceries", 300.0),
            Expense::new("2024-01-20", "Train", 200.0),
        ],
        current_month: Some("2024-1".into()),
    }
}

#[test]
fn rollover_carries_remaining_budget_into_new_month() {
    let base = temp_base();
    store_in(&base, 2024, 1).save(&january()).unwrap();

    let tracker = Tracker::new(store_in(&base, 2024, 2));
    let outcome = tracker.startup().unwrap();

    assert!(outcome.rolled_over());
    let expected = Ledger {
        budget: Some(500.0),
        fixed_items: vec![FixedItem::new("Rent", 700.0)],
        expenses: Vec::new(),
        current_month: Some("2024-2".into()),
    };
    assert_eq!(tracker.ledger(), expected);
    if let RolloverOutcome::RolledOver {
        from,
        carried_budget,
        ..
    } = outcome
    {
        assert_eq!(from.as_deref(), Some("2024-1"));
        assert_eq!(carried_budget, 500.0);
    }
}

#[test]
fn rollover_is_a_no_op_within_the_same_month() {
    let base = temp_base();
    let store = store_in(&base, 2024, 1);
    let saved = store.save(&january()).unwrap();

    let tracker = Tracker::new(store_in(&base, 2024, 1));
    let outcome = tracker.startup().unwrap();

    assert!(!outcome.rolled_over());
    assert_eq!(tracker.ledger(), saved);
}

#[test]
fn zero_padded_legacy_month_is_treated_as_current() {
    let base = temp_base();
    let ledger = Ledger {
        current_month: Some("2024-01".into()),
        ..january()
    };
    store_in(&base, 2024, 1).save(&ledger).unwrap();

    let tracker = Tracker::new(store_in(&base, 2024, 1));
    assert!(!tracker.startup().unwrap().rolled_over());
    assert_eq!(tracker.ledger().expenses.len(), 2);
}

#[test]
fn rollover_across_a_year_boundary() {
    let base = temp_base();
    let december = Ledger {
        budget: Some(50.0),
        expenses: vec![Expense::new("2023-12-24", "Gifts", 80.0)],
        current_month: Some("2023-12".into()),
        ..Ledger::default()
    };
    store_in(&base, 2023, 12).save(&december).unwrap();

    let tracker = Tracker::new(store_in(&base, 2024, 1));
    tracker.startup().unwrap();

    let ledger = tracker.ledger();
    assert_eq!(ledger.budget, Some(-30.0));
    assert_eq!(ledger.current_month.as_deref(), Some("2024-1"));
}
