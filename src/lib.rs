pub mod config;
pub mod extractors;
pub mod models;
pub mod output;
pub mod services;
pub mod workbook;
