use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::{
    core::services::{
        ExpenseField, ExpenseService, ExportKind, ExportService, LedgerSummary, MergeOutcome,
        MergeService, RolloverOutcome, RolloverService, SummaryService,
    },
    errors::Result,
    ledger::{Expense, Ledger, MonthKey},
    storage::LedgerStore,
};

/// Describes the change that produced a newly persisted ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    RolledOver {
        from: Option<String>,
        to: MonthKey,
        carried_budget: f64,
    },
    BudgetChanged {
        budget: Option<f64>,
    },
    FixedItemsChanged,
    ExpensesChanged,
    MonthCleared {
        removed: usize,
    },
    Merged {
        budget_adopted: bool,
        fixed_items_added: usize,
        expenses_added: usize,
    },
    Cleared,
    /// State re-written without a logical change (shutdown).
    Persisted,
}

/// Subscriber notified after every successful write.
pub trait LedgerObserver {
    fn ledger_changed(&self, event: &LedgerEvent, ledger: &Ledger);
}

/// Owns the persistence gateway and runs each read-modify-write cycle.
///
/// Every operation loads the stored ledger, applies one change, saves the full
/// snapshot and then notifies observers with the persisted state. Operations on
/// out-of-range rows return `false` without writing.
///
/// Two processes sharing one store are not isolated from each other: the last
/// writer wins.
pub struct Tracker {
    store: LedgerStore,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl Tracker {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn ledger(&self) -> Ledger {
        self.store.load()
    }

    pub fn summary(&self) -> LedgerSummary {
        SummaryService::summarize(&self.store.load())
    }

    /// Process start hook: rolls the ledger into the current month when needed.
    pub fn startup(&self) -> Result<RolloverOutcome> {
        let outcome = RolloverService::rollover_if_needed(&self.store)?;
        if let RolloverOutcome::RolledOver {
            from,
            to,
            carried_budget,
            ledger,
        } = &outcome
        {
            self.notify(
                &LedgerEvent::RolledOver {
                    from: from.clone(),
                    to: *to,
                    carried_budget: *carried_budget,
                },
                ledger,
            );
        }
        Ok(outcome)
    }

    /// Process teardown hook: re-persists the current state unconditionally.
    pub fn shutdown(&self) -> Result<()> {
        let ledger = self.store.load();
        self.commit(&ledger, LedgerEvent::Persisted)?;
        Ok(())
    }

    pub fn set_budget(&self, budget: Option<f64>) -> Result<Ledger> {
        let mut ledger = self.store.load();
        ExpenseService::set_budget(&mut ledger, budget)?;
        self.commit(&ledger, LedgerEvent::BudgetChanged { budget })
    }

    /// Returns `false` when an equivalent template already exists.
    pub fn add_fixed_item(&self, name: &str, price: f64) -> Result<bool> {
        let mut ledger = self.store.load();
        if !ExpenseService::add_fixed_item(&mut ledger, name, price)? {
            return Ok(false);
        }
        self.commit(&ledger, LedgerEvent::FixedItemsChanged)?;
        Ok(true)
    }

    pub fn remove_fixed_item(&self, index: usize) -> Result<bool> {
        let mut ledger = self.store.load();
        if ExpenseService::remove_fixed_item(&mut ledger, index).is_none() {
            return Ok(false);
        }
        self.commit(&ledger, LedgerEvent::FixedItemsChanged)?;
        Ok(true)
    }

    pub fn add_expense(&self, expense: Expense) -> Result<Ledger> {
        let mut ledger = self.store.load();
        ExpenseService::add_expense(&mut ledger, expense);
        self.commit(&ledger, LedgerEvent::ExpensesChanged)
    }

    pub fn add_blank_expense(&self) -> Result<Ledger> {
        let mut ledger = self.store.load();
        ExpenseService::add_blank_expense(&mut ledger, self.store.clock().today());
        self.commit(&ledger, LedgerEvent::ExpensesChanged)
    }

    pub fn add_expense_from_fixed(&self, index: usize) -> Result<bool> {
        let mut ledger = self.store.load();
        let today = self.store.clock().today();
        if !ExpenseService::add_expense_from_fixed(&mut ledger, index, today) {
            return Ok(false);
        }
        self.commit(&ledger, LedgerEvent::ExpensesChanged)?;
        Ok(true)
    }

    pub fn edit_expense(&self, index: usize, field: ExpenseField) -> Result<bool> {
        let mut ledger = self.store.load();
        if !ExpenseService::edit_expense(&mut ledger, index, field) {
            return Ok(false);
        }
        self.commit(&ledger, LedgerEvent::ExpensesChanged)?;
        Ok(true)
    }

    pub fn delete_expense(&self, index: usize) -> Result<bool> {
        let mut ledger = self.store.load();
        if ExpenseService::delete_expense(&mut ledger, index).is_none() {
            return Ok(false);
        }
        self.commit(&ledger, LedgerEvent::ExpensesChanged)?;
        Ok(true)
    }

    pub fn clear_month(&self) -> Result<Ledger> {
        let mut ledger = self.store.load();
        let removed = ExpenseService::clear_month(&mut ledger);
        info!(removed, "cleared month expenses");
        self.commit(&ledger, LedgerEvent::MonthCleared { removed })
    }

    /// Removes the stored ledger entirely and starts over for the current month.
    pub fn clear_all(&self) -> Result<Ledger> {
        let ledger = self.store.clear()?;
        info!("cleared all stored data");
        self.notify(&LedgerEvent::Cleared, &ledger);
        Ok(ledger)
    }

    pub fn merge_value(&self, uploaded: &Value) -> Result<MergeOutcome> {
        let outcome = MergeService::merge(&self.store, uploaded)?;
        self.notify(
            &LedgerEvent::Merged {
                budget_adopted: outcome.budget_adopted,
                fixed_items_added: outcome.fixed_items_added,
                expenses_added: outcome.expenses_added,
            },
            &outcome.ledger,
        );
        Ok(outcome)
    }

    /// Reads and merges an import file. Read or parse failures abort before any write.
    pub fn import_file(&self, path: &Path) -> Result<MergeOutcome> {
        let uploaded = ExportService::read_import(path)?;
        self.merge_value(&uploaded)
    }

    pub fn export(&self, kind: ExportKind, dir: &Path) -> Result<PathBuf> {
        let ledger = self.store.load();
        let clock = self.store.clock();
        let document = ExportService::document(kind, &ledger, clock.today(), clock.month_key())?;
        let path = ExportService::write_document(&document, dir)?;
        info!(path = %path.display(), ?kind, "exported ledger");
        Ok(path)
    }

    fn commit(&self, ledger: &Ledger, event: LedgerEvent) -> Result<Ledger> {
        let saved = self.store.save(ledger)?;
        self.notify(&event, &saved);
        Ok(saved)
    }

    fn notify(&self, event: &LedgerEvent, ledger: &Ledger) {
        for observer in &self.observers {
            observer.ledger_changed(event, ledger);
        }
    }
}
