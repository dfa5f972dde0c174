#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use budget_tracker::{
    core::{FixedClock, Tracker},
    storage::{JsonFileStore, LedgerStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn clock(year: i32, month: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::at_month(year, month).expect("valid month"))
}

/// Gateway over a JSON file store in `base/store`, pinned to the given month.
pub fn store_in(base: &Path, year: i32, month: u32) -> LedgerStore {
    LedgerStore::in_dir(base.join("store"), clock(year, month)).expect("create ledger store")
}

/// Path of the file backing the ledger slot under `base`.
pub fn ledger_file(base: &Path) -> PathBuf {
    JsonFileStore::new(base.join("store"))
        .expect("open json store")
        .value_path(budget_tracker::storage::STORAGE_KEY)
}

/// Creates an isolated tracker backed by a unique directory.
pub fn setup_tracker(year: i32, month: u32) -> (Tracker, PathBuf) {
    let base = temp_base();
    let tracker = Tracker::new(store_in(&base, year, month));
    (tracker, base)
}
