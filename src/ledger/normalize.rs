//! Coerces untrusted snapshots into the canonical [`Ledger`] shape.
//!
//! Nothing here fails: every malformed field falls back to its default on its own,
//! so a single bad row never discards the rest of a snapshot.

use chrono::NaiveDate;
use serde_json::Value;

use super::ledger::{Expense, FixedItem, Ledger};

/// Builds a ledger from an arbitrary JSON value.
///
/// `today` fills expense rows that carry no date.
pub fn normalize(raw: &Value, today: NaiveDate) -> Ledger {
    let Some(object) = raw.as_object() else {
        return Ledger::default();
    };

    let budget = match object.get("budget") {
        None | Some(Value::Null) => None,
        Some(value) => coerce_number(value),
    };

    let fixed_items = object
        .get("fixedItems")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_fixed_item).collect())
        .unwrap_or_default();

    let expenses = object
        .get("expenses")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().map(|row| normalize_expense(row, today)).collect())
        .unwrap_or_default();

    Ledger {
        budget,
        fixed_items,
        expenses,
        current_month: coerce_text(object.get("currentMonth")),
    }
}

/// Re-applies the canonical shape to an in-memory ledger.
///
/// Non-finite numbers are replaced the same way [`normalize`] treats unparseable input.
pub fn normalize_ledger(ledger: &Ledger, today: NaiveDate) -> Ledger {
    Ledger {
        budget: ledger.budget.filter(|budget| budget.is_finite()),
        fixed_items: ledger
            .fixed_items
            .iter()
            .map(|item| FixedItem::new(item.name.clone(), finite_or_zero(item.price)))
            .collect(),
        expenses: ledger
            .expenses
            .iter()
            .map(|row| {
                let date = if row.date.is_empty() {
                    today_iso(today)
                } else {
                    row.date.clone()
                };
                Expense::new(date, row.name.clone(), finite_or_zero(row.price))
            })
            .collect(),
        current_month: ledger
            .current_month
            .clone()
            .filter(|month| !month.is_empty()),
    }
}

/// Parses user-typed price text; anything non-numeric becomes zero.
pub fn parse_price(text: &str) -> f64 {
    coerce_number(&Value::String(text.to_string())).unwrap_or(0.0)
}

pub fn today_iso(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

fn normalize_fixed_item(raw: &Value) -> FixedItem {
    FixedItem::new(
        coerce_text(raw.get("name")).unwrap_or_default(),
        coerce_price(raw.get("price")),
    )
}

fn normalize_expense(raw: &Value, today: NaiveDate) -> Expense {
    Expense::new(
        coerce_text(raw.get("date")).unwrap_or_else(|| today_iso(today)),
        coerce_text(raw.get("name")).unwrap_or_default(),
        coerce_price(raw.get("price")),
    )
}

fn coerce_price(value: Option<&Value>) -> f64 {
    value.and_then(coerce_number).unwrap_or(0.0)
}

/// Loose numeric conversion: numbers, numeric strings, booleans and null.
/// Returns `None` for anything that does not yield a finite number.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Text conversion where empty, zero, false and structured values count as absent.
fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn non_objects_become_default_ledger() {
        for raw in [json!(null), json!(42), json!("ledger"), json!([1, 2])] {
            assert_eq!(normalize(&raw, today()), Ledger::default());
        }
    }

    #[test]
    fn coerces_loose_numbers() {
        let raw = json!({
            "budget": " 250.5 ",
            "fixedItems": [
                { "name": "Gym", "price": "30" },
                { "name": "Bad", "price": "thirty" },
                { "name": "Flag", "price": true }
            ]
        });
        let ledger = normalize(&raw, today());
        assert_eq!(ledger.budget, Some(250.5));
        let prices: Vec<f64> = ledger.fixed_items.iter().map(|item| item.price).collect();
        assert_eq!(prices, vec![30.0, 0.0, 1.0]);
    }

    #[test]
    fn unparseable_budget_becomes_null() {
        let ledger = normalize(&json!({ "budget": "lots" }), today());
        assert_eq!(ledger.budget, None);
        let ledger = normalize(&json!({ "budget": { "amount": 5 } }), today());
        assert_eq!(ledger.budget, None);
    }

    #[test]
    fn malformed_rows_are_defaulted_individually() {
        let raw = json!({
            "expenses": [
                null,
                7,
                { "name": "Lunch", "price": 12 },
                { "date": "2024-05-01", "name": 99, "price": null }
            ],
            "currentMonth": ""
        });
        let ledger = normalize(&raw, today());
        assert_eq!(
            ledger.expenses,
            vec![
                Expense::new("2024-05-17", "", 0.0),
                Expense::new("2024-05-17", "", 0.0),
                Expense::new("2024-05-17", "Lunch", 12.0),
                Expense::new("2024-05-01", "99", 0.0),
            ]
        );
        assert_eq!(ledger.current_month, None);
    }

    #[test]
    fn normalize_ledger_scrubs_non_finite_values() {
        let ledger = Ledger {
            budget: Some(f64::NAN),
            fixed_items: vec![FixedItem::new("Rent", f64::INFINITY)],
            expenses: vec![Expense::new("", "Snack", f64::NEG_INFINITY)],
            current_month: Some(String::new()),
        };
        let cleaned = normalize_ledger(&ledger, today());
        assert_eq!(cleaned.budget, None);
        assert_eq!(cleaned.fixed_items[0].price, 0.0);
        assert_eq!(cleaned.expenses[0], Expense::new("2024-05-17", "Snack", 0.0));
        assert_eq!(cleaned.current_month, None);
    }

    #[test]
    fn parse_price_defaults_to_zero() {
        assert_eq!(parse_price("12.25"), 12.25);
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price(""), 0.0);
    }
}
