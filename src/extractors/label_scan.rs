/// Label scan used by the 2014-2016 layouts
///
/// These reports have no fixed position for the guest totals. The scanner
/// walks the first rows of the sheet looking for a first-column label that
/// mentions totals or guests, and accepts the row once it carries enough
/// positive numbers to be a monthly series.
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::extractors::{locate_sheet, ExtractError};
use crate::models::{pad_months, ExtractionResult};
use crate::workbook::{Grid, Workbook};

pub const Q_SERIES_SHEETS: [&str; 3] = ["Q1", "Quadro 1", "q1"];
pub const NUMERIC_CODE_SHEETS: [&str; 3] = ["611", "6.1.1", "61.1"];

const SCAN_ROWS: usize = 50;
/// Value columns inspected: B through T
const VALUE_COLUMNS: std::ops::Range<usize> = 1..20;
const MIN_MONTHS: usize = 6;

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"total|hóspedes|hospedes").expect("valid label pattern"))
}

pub fn extract(
    workbook: &mut dyn Workbook,
    candidates: &[&str],
) -> Result<ExtractionResult, ExtractError> {
    let sheet = locate_sheet(workbook, candidates)?;
    let grid = workbook.grid(&sheet)?;
    scan(&grid, &sheet)
}

/// First row in the scan window whose label matches and which holds at
/// least six positive numbers; its first twelve such numbers become the months
pub fn scan(grid: &Grid, sheet: &str) -> Result<ExtractionResult, ExtractError> {
    for row in 0..grid.height().min(SCAN_ROWS) {
        let label = grid.label(row);
        if !label_pattern().is_match(&label) {
            continue;
        }

        let values: Vec<f64> = VALUE_COLUMNS
            .filter_map(|col| grid.number(row, col))
            .filter(|v| *v > 0.0)
            .collect();

        if values.len() < MIN_MONTHS {
            debug!(
                "Row {} '{}' has only {} positive values, continuing",
                row,
                label,
                values.len()
            );
            continue;
        }

        return Ok(ExtractionResult {
            row_index: row,
            matched_label: label,
            sheet_name: sheet.to_string(),
            monthly_values: pad_months(values.into_iter().map(Some)),
            annual_total: None,
        });
    }

    Err(ExtractError::PatternNotFound {
        sheet: sheet.to_string(),
        msg: format!("no total/guest row with {MIN_MONTHS}+ values in first {SCAN_ROWS} rows"),
    })
}
