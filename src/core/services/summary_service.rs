use crate::ledger::Ledger;

/// Running totals for the active month.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub month: Option<String>,
    pub budget: Option<f64>,
    pub total_expenses: f64,
    /// `None` while no budget is set.
    pub remaining: Option<f64>,
    pub fixed_item_count: usize,
    pub expense_count: usize,
}

impl LedgerSummary {
    pub fn over_budget(&self) -> bool {
        self.remaining.is_some_and(|remaining| remaining < 0.0)
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(ledger: &Ledger) -> LedgerSummary {
        LedgerSummary {
            month: ledger.current_month.clone(),
            budget: ledger.budget,
            total_expenses: ledger.total_expenses(),
            remaining: ledger.remaining(),
            fixed_item_count: ledger.fixed_items.len(),
            expense_count: ledger.expenses.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Expense;

    #[test]
    fn summary_tracks_spending_against_budget() {
        let mut ledger = Ledger::default();
        ledger.budget = Some(50.0);
        ledger.expenses.push(Expense::new("2024-02-01", "Books", 35.0));
        ledger.expenses.push(Expense::new("2024-02-03", "Cinema", 20.0));

        let summary = SummaryService::summarize(&ledger);
        assert_eq!(summary.total_expenses, 55.0);
        assert_eq!(summary.remaining, Some(-5.0));
        assert!(summary.over_budget());
        assert_eq!(summary.expense_count, 2);
    }

    #[test]
    fn no_budget_means_no_remaining() {
        let summary = SummaryService::summarize(&Ledger::default());
        assert_eq!(summary.remaining, None);
        assert!(!summary.over_budget());
    }
}
