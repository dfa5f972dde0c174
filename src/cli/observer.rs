use crate::{
    cli::output,
    core::{LedgerEvent, LedgerObserver},
    ledger::Ledger,
};

/// Echoes each persisted change to the terminal.
pub struct ShellObserver;

impl LedgerObserver for ShellObserver {
    fn ledger_changed(&self, event: &LedgerEvent, ledger: &Ledger) {
        match event {
            LedgerEvent::RolledOver {
                from,
                to,
                carried_budget,
            } => output::success(format!(
                "New month {} started (was {}); carried budget {}.",
                to,
                from.as_deref().unwrap_or("unset"),
                output::amount(*carried_budget)
            )),
            LedgerEvent::BudgetChanged { budget: Some(value) } => {
                output::success(format!("Budget set to {}.", output::amount(*value)))
            }
            LedgerEvent::BudgetChanged { budget: None } => output::success("Budget cleared."),
            LedgerEvent::FixedItemsChanged => output::success(format!(
                "Fixed items updated ({} total).",
                ledger.fixed_items.len()
            )),
            LedgerEvent::ExpensesChanged => output::success(format!(
                "Expenses updated: {} row(s), total {}.",
                ledger.expenses.len(),
                output::amount(ledger.total_expenses())
            )),
            LedgerEvent::MonthCleared { removed } => {
                output::success(format!("Cleared {removed} expense(s) for this month."))
            }
            LedgerEvent::Merged {
                budget_adopted,
                fixed_items_added,
                expenses_added,
            } => {
                output::success("Uploaded and merged JSON successfully.");
                output::info(format!(
                    "Added {fixed_items_added} fixed item(s) and {expenses_added} expense(s){}.",
                    if *budget_adopted { "; budget adopted" } else { "" }
                ));
            }
            LedgerEvent::Cleared => output::success("All saved data cleared."),
            LedgerEvent::Persisted => {}
        }
    }
}
