pub mod transactions_file;
