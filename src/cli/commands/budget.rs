use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::{parse_amount, usage_error};

const BUDGET_USAGE: &str = "budget <amount>|clear";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show budget, spending, and what remains",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("budget", "Set or clear the monthly budget", BUDGET_USAGE, cmd_budget),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.tracker.summary();
    let dash = || "-".to_string();
    output::section(format!(
        "Summary {}",
        summary.month.as_deref().unwrap_or_default()
    ));
    output::two_column(&[
        ("Budget", summary.budget.map(output::amount).unwrap_or_else(dash)),
        ("Expenses", output::amount(summary.total_expenses)),
        (
            "Remaining",
            summary.remaining.map(output::amount).unwrap_or_else(dash),
        ),
        ("Fixed items", summary.fixed_item_count.to_string()),
        ("Rows", summary.expense_count.to_string()),
    ]);
    if summary.over_budget() {
        output::warning("Spending exceeds the budget.");
    }
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let budget = match args {
        ["clear"] => None,
        [value] => Some(parse_amount(value)?),
        _ => return Err(usage_error(BUDGET_USAGE)),
    };
    context.tracker.set_budget(budget)?;
    Ok(())
}
