use chrono::NaiveDate;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::ExpenseField;
use crate::ledger::{today_iso, Expense};

use super::{parse_amount, parse_index, usage_error};

const EXPENSE_USAGE: &str = "expense add <name> <price> [YYYY-MM-DD] | expense new | expense list \
     | expense edit <n> date|name|price <value> | expense delete <n>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Log, edit, and delete this month's expenses",
        EXPENSE_USAGE,
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add", name, price] => add(context, name, price, None),
        ["add", name, price, date] => add(context, name, price, Some(*date)),
        ["new"] => {
            context.tracker.add_blank_expense()?;
            Ok(())
        }
        ["list"] | [] => {
            list_expenses(context);
            Ok(())
        }
        ["edit", index, field, value] => {
            let row = parse_index(index)?;
            let field = match *field {
                "date" => ExpenseField::Date(parse_date(value)?),
                "name" => ExpenseField::Name(value.to_string()),
                "price" => ExpenseField::Price(value.to_string()),
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown field `{other}`; expected date, name, or price"
                    )))
                }
            };
            if !context.tracker.edit_expense(row, field)? {
                output::warning(format!("No expense #{index}; nothing changed."));
            }
            Ok(())
        }
        ["delete", index] => {
            let row = parse_index(index)?;
            if !context.tracker.delete_expense(row)? {
                output::warning(format!("No expense #{index}; nothing changed."));
            }
            Ok(())
        }
        _ => Err(usage_error(EXPENSE_USAGE)),
    }
}

fn add(context: &mut ShellContext, name: &str, price: &str, date: Option<&str>) -> CommandResult {
    let price = parse_amount(price)?;
    let date = match date {
        Some(raw) => parse_date(raw)?,
        None => today_iso(context.tracker.store().clock().today()),
    };
    context.tracker.add_expense(Expense::new(date, name, price))?;
    Ok(())
}

fn parse_date(raw: &str) -> Result<String, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(today_iso)
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a YYYY-MM-DD date")))
}

fn list_expenses(context: &ShellContext) {
    let ledger = context.tracker.ledger();
    if ledger.expenses.is_empty() {
        output::info("No expenses logged this month.");
        return;
    }
    let rows: Vec<Vec<String>> = ledger
        .expenses
        .iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                (index + 1).to_string(),
                row.date.clone(),
                row.name.clone(),
                output::amount(row.price),
            ]
        })
        .collect();
    output::table(&["#", "Date", "Name", "Price"], &rows);
    output::info(format!("Total: {}", output::amount(ledger.total_expenses())));
}
