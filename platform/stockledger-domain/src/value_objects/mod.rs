pub mod ticker;
pub mod transaction;
