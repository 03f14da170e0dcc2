use crate::value_objects::transaction::Transaction;
use std::path::PathBuf;
use thiserror::Error;

/// Records in source order. Dropping the stream releases whatever the
/// source opened for it.
pub type TransactionStream<'a> = Box<dyn Iterator<Item = Transaction> + 'a>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transaction source not found: {path}")]
    NotFound { path: PathBuf },
    #[error("failed to open transaction source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait TransactionSource {
    /// Human-readable location, used in logs and user-facing messages.
    fn describe(&self) -> String;

    /// Opens a fresh stream starting at the first record.
    fn open(&self) -> Result<TransactionStream<'_>, SourceError>;
}
