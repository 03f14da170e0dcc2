pub mod config;
pub mod queries;
