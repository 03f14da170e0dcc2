use serde::{Deserialize, Serialize};

/// One line of the ledger: at `time`, `company` traded at `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub time: i64,
    pub company: String,
    pub price: f64,
}

impl Transaction {
    pub fn new(time: i64, company: impl Into<String>, price: f64) -> Self {
        Self {
            time,
            company: company.into(),
            price,
        }
    }
}
