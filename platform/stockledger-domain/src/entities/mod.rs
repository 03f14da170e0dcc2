pub mod price_snapshot;
