//! The ledger: ordered expense records mirrored to a [`LedgerStorage`].

use chrono::NaiveDate;
use tracing::{debug, warn};

use expense_domain::{same_month, ExpensePatch, ExpenseRecord};

use crate::{storage::LedgerStorage, time::Clock, CoreError};

/// Owns the in-memory ledger and rewrites the full sequence to storage after every mutation.
///
/// Record positions are insertion order. Editing a record moves it to the end, the same as
/// deleting it and adding the merged record back.
pub struct LedgerStore {
    records: Vec<ExpenseRecord>,
    storage: Box<dyn LedgerStorage>,
    clock: Box<dyn Clock>,
    load_error: Option<String>,
}

impl LedgerStore {
    /// Loads the persisted ledger, starting empty when nothing is stored or the stored
    /// content cannot be read.
    pub fn load(storage: Box<dyn LedgerStorage>, clock: Box<dyn Clock>) -> Self {
        let (records, load_error) = match storage.load_records() {
            Ok(Some(records)) => (records, None),
            Ok(None) => (Vec::new(), None),
            Err(err) => {
                warn!("discarding unreadable ledger, starting empty: {err}");
                (Vec::new(), Some(err.to_string()))
            }
        };
        debug!(count = records.len(), "ledger loaded");
        Self {
            records,
            storage,
            clock,
            load_error,
        }
    }

    /// Why the stored ledger was discarded at load, if it was.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExpenseRecord> {
        self.records.get(index)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Checks the insert-time invariants against the clock's current date.
    pub fn validate(&self, record: &ExpenseRecord) -> Result<(), CoreError> {
        self.validate_amount_and_date(record)?;
        if !record.category.is_valid() {
            return Err(CoreError::Validation(format!(
                "invalid category `{}`",
                record.category
            )));
        }
        Ok(())
    }

    fn validate_amount_and_date(&self, record: &ExpenseRecord) -> Result<(), CoreError> {
        if !record.amount.is_finite() || record.amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "amount must be greater than zero (got {})",
                record.amount
            )));
        }
        let today = self.clock.today();
        if record.date > today {
            return Err(CoreError::Validation(format!(
                "date {} is in the future (today is {})",
                record.date, today
            )));
        }
        Ok(())
    }

    /// A category the patch leaves alone is kept as loaded, so records with legacy labels
    /// stay editable.
    fn validate_edit(&self, merged: &ExpenseRecord, patch: &ExpensePatch) -> Result<(), CoreError> {
        if patch.category.is_none() {
            self.validate_amount_and_date(merged)
        } else {
            self.validate(merged)
        }
    }

    /// Appends a validated record and returns its position.
    pub fn add(&mut self, record: ExpenseRecord) -> Result<usize, CoreError> {
        self.validate(&record)?;
        self.records.push(record);
        let index = self.records.len() - 1;
        debug!(index, "expense added");
        self.persist()?;
        Ok(index)
    }

    /// Removes and returns the record at `index`.
    pub fn delete(&mut self, index: usize) -> Result<ExpenseRecord, CoreError> {
        self.ensure_index(index)?;
        let removed = self.records.remove(index);
        debug!(index, "expense deleted");
        self.persist()?;
        Ok(removed)
    }

    /// Replaces the record at `index` with `patch` applied, moving it to the end.
    ///
    /// The merged record is validated before anything is removed, so a rejected edit
    /// leaves the ledger as it was. Returns the record's new position.
    pub fn edit(&mut self, index: usize, patch: &ExpensePatch) -> Result<usize, CoreError> {
        self.ensure_index(index)?;
        let merged = self.records[index].merged_with(patch);
        self.validate_edit(&merged, patch)?;
        self.records.remove(index);
        self.records.push(merged);
        let new_index = self.records.len() - 1;
        debug!(from = index, to = new_index, "expense edited");
        self.persist()?;
        Ok(new_index)
    }

    /// Appends a copy dated `today` for every recurring record from a different month.
    ///
    /// Only records present before the call are examined. Nothing checks whether a copy for
    /// this month already exists, so each recurring record from an earlier month produces a
    /// new copy on every call. Always persists. Returns the number of copies appended.
    pub fn apply_monthly_rollover(&mut self, today: NaiveDate) -> Result<usize, CoreError> {
        let copies: Vec<ExpenseRecord> = self
            .records
            .iter()
            .filter(|record| record.recurring && !same_month(record.date, today))
            .map(|record| record.rolled_over_to(today))
            .collect();
        let appended = copies.len();
        self.records.extend(copies);
        if appended > 0 {
            debug!(appended, %today, "recurring expenses rolled over");
        }
        self.persist()?;
        Ok(appended)
    }

    /// Writes the full sequence to storage.
    pub fn persist(&self) -> Result<(), CoreError> {
        self.storage.save_records(&self.records).map_err(|err| {
            warn!("ledger save failed: {err}");
            err
        })
    }

    fn ensure_index(&self, index: usize) -> Result<(), CoreError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(CoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }
}
