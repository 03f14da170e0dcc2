pub mod performance;
pub mod snapshot;
pub mod transaction_source;
