use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use expense_domain::ExpenseRecord;

use crate::CoreError;

/// Abstraction over the key-value slot that holds the serialized ledger.
pub trait LedgerStorage: Send + Sync {
    /// Reads the persisted sequence. `Ok(None)` means nothing has been stored yet.
    fn load_records(&self) -> Result<Option<Vec<ExpenseRecord>>, CoreError>;

    /// Replaces the persisted sequence with `records`.
    fn save_records(&self, records: &[ExpenseRecord]) -> Result<(), CoreError>;
}

/// Process-local storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStorage {
    slot: Arc<Mutex<Option<Vec<ExpenseRecord>>>>,
    saves: Arc<AtomicUsize>,
    fail_writes: bool,
}

impl MemoryLedgerStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        let storage = Self::default();
        if let Ok(mut slot) = storage.slot.lock() {
            *slot = Some(records);
        }
        storage
    }

    /// Storage whose writes always fail, for exercising "could not save" paths.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Snapshot of what is currently persisted.
    pub fn snapshot(&self) -> Option<Vec<ExpenseRecord>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Number of successful writes so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl LedgerStorage for MemoryLedgerStorage {
    fn load_records(&self) -> Result<Option<Vec<ExpenseRecord>>, CoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save_records(&self, records: &[ExpenseRecord]) -> Result<(), CoreError> {
        if self.fail_writes {
            return Err(CoreError::Storage("memory storage is read-only".into()));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".into()))?;
        *slot = Some(records.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
