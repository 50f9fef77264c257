// Extraction strategies for the yearly tourism reports
//
// Each report year uses one of four layouts:
// - 2014-2015: "Q1"-style sheets, label scan over the first 50 rows
// - 2016: "611"-style sheets, same label scan
// - 2017-2021, 2023: sheet "2.1", exact "Total" row near the top
// - 2022: sheet "3.1", row 9 with a magnitude check

pub mod error;
pub mod format;
pub mod label_scan;
pub mod special;
pub mod standard;

pub use error::ExtractError;
pub use format::{ExtractOptions, FormatFamily};

use tracing::debug;

use crate::workbook::Workbook;

/// Return the first candidate sheet name present in the workbook
pub fn locate_sheet(workbook: &dyn Workbook, candidates: &[&str]) -> Result<String, ExtractError> {
    let available = workbook.sheet_names();

    match candidates
        .iter()
        .find(|candidate| available.iter().any(|name| name == *candidate))
    {
        Some(found) => {
            debug!("Using sheet '{}'", found);
            Ok((*found).to_string())
        }
        None => {
            debug!(
                "None of {:?} present; workbook has {:?}",
                candidates, available
            );
            Err(ExtractError::SheetNotFound(candidates.join(", ")))
        }
    }
}
