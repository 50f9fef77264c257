use tracing::debug;

use crate::extractors::ExtractError;
use crate::models::{pad_months, ExtractionResult};
use crate::workbook::{Grid, Workbook};

pub const SHEET: &str = "2.1";

/// The "Total" row sits around rows 9-11 in every standard report
const SCAN_ROWS: std::ops::Range<usize> = 8..15;
const ANNUAL_COL: usize = 1;
const FIRST_MONTH_COL: usize = 2;

pub fn extract(workbook: &mut dyn Workbook) -> Result<ExtractionResult, ExtractError> {
    if !workbook.has_sheet(SHEET) {
        return Err(ExtractError::SheetNotFound(SHEET.to_string()));
    }
    let grid = workbook.grid(SHEET)?;
    scan(&grid)
}

/// Parse sheet "2.1"
///
/// # Expected Row Structure:
/// ```text
/// Col A: "Total" (exact, any case)
/// Col B: annual total
/// Col C-N: January through December
/// ```
pub fn scan(grid: &Grid) -> Result<ExtractionResult, ExtractError> {
    let end = SCAN_ROWS.end.min(grid.height());

    for row in SCAN_ROWS.start..end {
        if grid.label(row) != "total" {
            continue;
        }
        debug!("Found 'Total' row at index {}", row);

        let months = (FIRST_MONTH_COL..FIRST_MONTH_COL + 12).map(|col| grid.number(row, col));

        return Ok(ExtractionResult {
            row_index: row,
            matched_label: "total".to_string(),
            sheet_name: SHEET.to_string(),
            monthly_values: pad_months(months),
            annual_total: grid.number(row, ANNUAL_COL),
        });
    }

    Err(ExtractError::PatternNotFound {
        sheet: SHEET.to_string(),
        msg: format!("no 'Total' row in rows {}-{}", SCAN_ROWS.start, SCAN_ROWS.end - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{Cell, MemoryWorkbook};

    fn sheet_with(row_idx: usize, cells: Vec<Cell>) -> Grid {
        let mut rows = vec![Vec::new(); row_idx];
        rows.push(cells);
        Grid::from_rows(rows)
    }

    fn total_row(label: &str) -> Vec<Cell> {
        let mut cells = vec![Cell::from(label), Cell::from(15000.0)];
        cells.extend((0..12).map(|m| Cell::from(800.0 + 50.0 * m as f64)));
        cells
    }

    #[test]
    fn test_exact_total_label() {
        let grid = sheet_with(9, total_row(" TOTAL "));
        let result = scan(&grid).unwrap();
        assert_eq!(result.row_index, 9);
        assert_eq!(result.annual_total, Some(15000.0));
        assert_eq!(result.monthly_values[0], Some(800.0));
        assert_eq!(result.monthly_values[11], Some(1350.0));
    }

    #[test]
    fn test_rejects_total_substring() {
        let grid = sheet_with(9, total_row("Total hóspedes"));
        assert!(matches!(
            scan(&grid),
            Err(ExtractError::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_rows_outside_window_are_ignored() {
        assert!(scan(&sheet_with(7, total_row("Total"))).is_err());
        assert!(scan(&sheet_with(15, total_row("Total"))).is_err());
        assert!(scan(&sheet_with(14, total_row("Total"))).is_ok());
    }

    #[test]
    fn test_short_row_is_padded() {
        let cells = vec![
            Cell::from("Total"),
            Cell::from("x"),
            Cell::from(100.0),
            Cell::Empty,
            Cell::from(300.0),
        ];
        let result = scan(&sheet_with(8, cells)).unwrap();
        assert_eq!(result.annual_total, None);
        assert_eq!(result.monthly_values.len(), 12);
        assert_eq!(result.monthly_values[0], Some(100.0));
        assert_eq!(result.monthly_values[1], None);
        assert_eq!(result.monthly_values[2], Some(300.0));
        assert!(result.monthly_values[3..].iter().all(Option::is_none));
    }

    #[test]
    fn test_missing_sheet() {
        let mut workbook = MemoryWorkbook::new().with_sheet("2.2", Grid::default());
        assert!(matches!(
            extract(&mut workbook),
            Err(ExtractError::SheetNotFound(_))
        ));
    }
}
