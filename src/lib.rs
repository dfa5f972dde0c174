#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps a single monthly ledger: a budget, reusable fixed
//! expense templates, and the month's logged expenses. The core reconciles
//! untrusted snapshots into that ledger, merges imports without duplication,
//! and rolls unspent budget into the next month.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Tracker tracing initialized.");
    });
}
