//! expense-storage-json
//!
//! Filesystem-backed key-value slot holding the ledger as a JSON array.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use expense_core::{CoreError, LedgerStorage};
use expense_domain::ExpenseRecord;
use tracing::debug;

/// Key the ledger is stored under unless configured otherwise.
pub const DEFAULT_LEDGER_KEY: &str = "expenses";

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger under `<data_dir>/<key>.json`, rewriting the whole file on every save.
#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    data_dir: PathBuf,
    key: String,
}

impl JsonLedgerStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_key(data_dir, DEFAULT_LEDGER_KEY)
    }

    pub fn with_key(data_dir: PathBuf, key: &str) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            key: canonical_key(key),
        })
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", self.key, SLOT_EXTENSION))
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn load_records(&self) -> Result<Option<Vec<ExpenseRecord>>, CoreError> {
        let path = self.slot_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        decode_ledger(&data)
    }

    fn save_records(&self, records: &[ExpenseRecord]) -> Result<(), CoreError> {
        let path = self.slot_path();
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &encode_ledger(records)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), count = records.len(), "ledger written");
        Ok(())
    }
}

/// Serializes the ledger in the persisted layout.
pub fn encode_ledger(records: &[ExpenseRecord]) -> Result<String, CoreError> {
    serde_json::to_string(records).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Parses persisted content. A literal `null` counts as nothing stored.
pub fn decode_ledger(data: &str) -> Result<Option<Vec<ExpenseRecord>>, CoreError> {
    serde_json::from_str(data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_LEDGER_KEY.into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
