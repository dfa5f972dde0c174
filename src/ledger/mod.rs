//! Ledger record model, month keys, and the shape normalizer.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod month_key;
pub mod normalize;

pub use ledger::{Expense, FixedItem, Ledger};
pub use month_key::MonthKey;
pub use normalize::{normalize, normalize_ledger, parse_price, today_iso};
