// Output tables and the console run summary

pub mod csv_writer;
pub mod summary;

pub use csv_writer::{write_tables, OutputError, OutputPaths};
pub use summary::RunSummary;
