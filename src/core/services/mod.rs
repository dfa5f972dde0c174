pub mod expense_service;
pub mod export_service;
pub mod merge_service;
pub mod rollover_service;
pub mod summary_service;

pub use expense_service::{ExpenseField, ExpenseService};
pub use export_service::{ExportDocument, ExportKind, ExportService};
pub use merge_service::{MergeOutcome, MergeService};
pub use rollover_service::{RolloverOutcome, RolloverService};
pub use summary_service::{LedgerSummary, SummaryService};
