use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("No expense at position {index} (ledger holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Could not save: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Returns `true` for errors raised before the ledger was touched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::IndexOutOfRange { .. }
        )
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Export(err.to_string())
    }
}
