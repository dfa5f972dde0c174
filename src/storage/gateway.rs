use std::{path::PathBuf, sync::Arc};

use serde_json::Value;
use tracing::{debug, warn};

use super::{JsonFileStore, KeyValueStore};
use crate::{
    core::clock::Clock,
    errors::Result,
    ledger::{normalize, normalize_ledger, Ledger},
};

/// Versioned slot holding the serialized ledger. A shape change gets a new key.
pub const STORAGE_KEY: &str = "pfm_data_v1";

/// Sole mediator between the ledger and durable storage.
///
/// Every value read or written passes through the shape normalizer, and every
/// materialized ledger carries a month key.
pub struct LedgerStore {
    backend: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    pub fn new(backend: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Gateway over a [`JsonFileStore`](super::JsonFileStore) rooted at `dir`.
    pub fn in_dir(dir: PathBuf, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::new(Box::new(JsonFileStore::new(dir)?), clock))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Reads the persisted ledger, falling back to an empty one for the current
    /// month when nothing is stored or the stored value cannot be read.
    pub fn load(&self) -> Ledger {
        let raw = match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                debug!("no persisted ledger; starting empty");
                return self.fresh();
            }
            Err(err) => {
                warn!(error = %err, "ledger read failed; using defaults");
                return self.fresh();
            }
        };
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "persisted ledger is not valid JSON; using defaults");
                return self.fresh();
            }
        };
        let mut ledger = normalize(&parsed, self.clock.today());
        ledger.ensure_month(self.clock.month_key());
        ledger
    }

    /// Normalizes and writes a full snapshot, returning exactly what was stored.
    pub fn save(&self, ledger: &Ledger) -> Result<Ledger> {
        let mut snapshot = normalize_ledger(ledger, self.clock.today());
        snapshot.ensure_month(self.clock.month_key());
        let json = serde_json::to_string(&snapshot)?;
        self.backend.set(STORAGE_KEY, &json)?;
        debug!(
            expenses = snapshot.expenses.len(),
            fixed_items = snapshot.fixed_items.len(),
            "ledger saved"
        );
        Ok(snapshot)
    }

    /// Removes the slot entirely and reinitializes it for the current month.
    pub fn clear(&self) -> Result<Ledger> {
        self.backend.remove(STORAGE_KEY)?;
        self.save(&self.fresh())
    }

    fn fresh(&self) -> Ledger {
        Ledger::for_month(self.clock.month_key())
    }
}
