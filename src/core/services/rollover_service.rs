//! Month-boundary transition carrying unspent budget forward.

use tracing::{debug, info};

use crate::{
    errors::Result,
    ledger::{Ledger, MonthKey},
    storage::LedgerStore,
};

#[derive(Debug, Clone, PartialEq)]
pub enum RolloverOutcome {
    /// The stored period already matches the wall-clock month.
    Unchanged { month: MonthKey },
    /// A new period was started and persisted.
    RolledOver {
        from: Option<String>,
        to: MonthKey,
        carried_budget: f64,
        ledger: Ledger,
    },
}

impl RolloverOutcome {
    pub fn rolled_over(&self) -> bool {
        matches!(self, RolloverOutcome::RolledOver { .. })
    }
}

pub struct RolloverService;

impl RolloverService {
    /// Starts a new period when the stored month differs from the clock's month.
    ///
    /// Expense history of the closed month is dropped; exports are the only archive.
    pub fn rollover_if_needed(store: &LedgerStore) -> Result<RolloverOutcome> {
        let month = store.clock().month_key();
        let ledger = store.load();
        if !Self::needs_rollover(&ledger, month) {
            debug!(%month, "ledger already on current month");
            return Ok(RolloverOutcome::Unchanged { month });
        }

        let next = Self::roll_forward(&ledger, month);
        let carried_budget = next.budget.unwrap_or_default();
        let saved = store.save(&next)?;
        info!(
            from = ledger.current_month.as_deref().unwrap_or("none"),
            to = %month,
            carried_budget,
            "rolled ledger over to new month"
        );
        Ok(RolloverOutcome::RolledOver {
            from: ledger.current_month,
            to: month,
            carried_budget,
            ledger: saved,
        })
    }

    pub fn needs_rollover(ledger: &Ledger, month: MonthKey) -> bool {
        !month.matches(ledger.current_month.as_deref())
    }

    /// Builds the next period's ledger. A missing budget counts as zero, so the
    /// carried amount is then the negative of the month's spending.
    pub fn roll_forward(ledger: &Ledger, month: MonthKey) -> Ledger {
        let remaining = ledger.budget.unwrap_or(0.0) - ledger.total_expenses();
        Ledger {
            budget: Some(remaining),
            fixed_items: ledger.fixed_items.clone(),
            expenses: Vec::new(),
            current_month: Some(month.to_string()),
        }
    }
}
