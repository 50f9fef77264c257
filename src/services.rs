pub mod aggregation;
pub mod extraction_service;

pub use aggregation::{annual_record, monthly_observations};
pub use extraction_service::{ExtractionService, RunOutcome};
