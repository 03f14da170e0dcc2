use crate::repositories::transactions::{SourceError, TransactionSource, TransactionStream};
use crate::value_objects::transaction::Transaction;

/// In-memory ledger. Every `open` replays the records from the start.
#[derive(Debug, Clone, Default)]
pub struct VecTransactionSource {
    label: String,
    records: Vec<Transaction>,
}

impl VecTransactionSource {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self {
            label: "memory".to_string(),
            records,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl TransactionSource for VecTransactionSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn open(&self) -> Result<TransactionStream<'_>, SourceError> {
        Ok(Box::new(self.records.iter().cloned()))
    }
}
