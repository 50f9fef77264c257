/// Sheet "3.1" layout used by the 2022 report
///
/// The guest totals moved to section 3 that year and the sheet also holds
/// business indicators with similar labels, so a matched row must pass a
/// magnitude check before it is trusted.
use tracing::{debug, info, warn};

use crate::extractors::ExtractError;
use crate::models::{pad_months, ExtractionResult};
use crate::workbook::{Grid, Workbook};

pub const SHEET: &str = "3.1";

const TARGET_ROW: usize = 9;
const FALLBACK_ROWS: std::ops::Range<usize> = 6..14;
/// Longer labels are descriptive text, not the totals row
const MAX_LABEL_CHARS: usize = 20;
const ANNUAL_COL: usize = 1;
const MIN_ANNUAL_TOTAL: f64 = 1000.0;
const FIRST_MONTH_COL: usize = 2;

pub fn extract(
    workbook: &mut dyn Workbook,
    plausibility_threshold: f64,
) -> Result<ExtractionResult, ExtractError> {
    if !workbook.has_sheet(SHEET) {
        warn!("Sheet {} not found in workbook", SHEET);
        return Err(ExtractError::SheetNotFound(SHEET.to_string()));
    }
    let grid = workbook.grid(SHEET)?;
    scan(&grid, plausibility_threshold)
}

pub fn scan(grid: &Grid, plausibility_threshold: f64) -> Result<ExtractionResult, ExtractError> {
    let (row, label) = find_total_row(grid)?;

    let annual_total = grid
        .number(row, ANNUAL_COL)
        .filter(|v| *v > MIN_ANNUAL_TOTAL);
    let monthly_values =
        pad_months((FIRST_MONTH_COL..FIRST_MONTH_COL + 12).map(|col| grid.number(row, col)));

    let positive: Vec<f64> = monthly_values
        .iter()
        .flatten()
        .copied()
        .filter(|v| *v > 0.0)
        .collect();

    if !positive.is_empty() {
        let average = positive.iter().sum::<f64>() / positive.len() as f64;
        if average < plausibility_threshold {
            warn!(
                "Row {} values look like business data, not tourism (avg: {:.1})",
                row, average
            );
            return Err(ExtractError::ImplausibleData {
                sheet: SHEET.to_string(),
                row,
                average,
            });
        }
    }

    let annual_total = match annual_total {
        Some(total) => Some(total),
        None if !positive.is_empty() => Some(positive.iter().sum()),
        None => None,
    };

    info!(
        "Extracted tourism data from sheet {}, row {} (annual total: {:?})",
        SHEET, row, annual_total
    );

    Ok(ExtractionResult {
        row_index: row,
        matched_label: label,
        sheet_name: SHEET.to_string(),
        monthly_values,
        annual_total,
    })
}

/// Row 9 when it is labelled as a total, otherwise the first short
/// "total" label in rows 6-13
fn find_total_row(grid: &Grid) -> Result<(usize, String), ExtractError> {
    if TARGET_ROW >= grid.height() {
        return Err(ExtractError::PatternNotFound {
            sheet: SHEET.to_string(),
            msg: format!("row {TARGET_ROW} not present"),
        });
    }

    let label = grid.label(TARGET_ROW);
    if label.contains("total") {
        return Ok((TARGET_ROW, label));
    }
    debug!("Row {} doesn't contain 'total': '{}'", TARGET_ROW, label);

    let end = FALLBACK_ROWS.end.min(grid.height());
    (FALLBACK_ROWS.start..end)
        .map(|row| (row, grid.label(row)))
        .find(|(_, label)| label.contains("total") && label.chars().count() < MAX_LABEL_CHARS)
        .inspect(|(row, _)| debug!("Found 'total' at row {}", row))
        .ok_or_else(|| ExtractError::PatternNotFound {
            sheet: SHEET.to_string(),
            msg: format!(
                "no short 'total' label in rows {}-{}",
                FALLBACK_ROWS.start,
                FALLBACK_ROWS.end - 1
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Cell;

    fn grid_with(rows: Vec<(usize, Vec<Cell>)>) -> Grid {
        let height = rows.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
        let mut grid_rows = vec![Vec::new(); height];
        for (i, cells) in rows {
            grid_rows[i] = cells;
        }
        Grid::from_rows(grid_rows)
    }

    fn data_row(label: &str, annual: Option<f64>, months: &[f64]) -> Vec<Cell> {
        let mut cells = vec![Cell::from(label), Cell::from(annual)];
        cells.extend(months.iter().map(|v| Cell::from(*v)));
        cells
    }

    #[test]
    fn test_primary_row_accepted() {
        let months: Vec<f64> = (0..12).map(|m| 500.0 + 100.0 * m as f64).collect();
        let grid = grid_with(vec![(9, data_row("Total", Some(20000.0), &months))]);
        let result = scan(&grid, 50.0).unwrap();
        assert_eq!(result.row_index, 9);
        assert_eq!(result.matched_label, "total");
        assert_eq!(result.annual_total, Some(20000.0));
        assert_eq!(result.monthly_values[0], Some(500.0));
    }

    #[test]
    fn test_small_values_rejected_as_business_data() {
        let months = [10.0, 12.0, 8.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        let grid = grid_with(vec![(9, data_row("Total", None, &months))]);
        match scan(&grid, 50.0) {
            Err(ExtractError::ImplausibleData { row, average, .. }) => {
                assert_eq!(row, 9);
                assert!((average - 10.0).abs() < 1e-9);
            }
            other => panic!("Expected ImplausibleData, got {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_configurable() {
        let grid = grid_with(vec![(9, data_row("Total", None, &[10.0; 12]))]);
        assert!(scan(&grid, 5.0).is_ok());
    }

    #[test]
    fn test_small_annual_total_recomputed_from_months() {
        let grid = grid_with(vec![(9, data_row("Total", Some(900.0), &[500.0, 600.0]))]);
        let result = scan(&grid, 50.0).unwrap();
        assert_eq!(result.annual_total, Some(1100.0));
        assert_eq!(result.monthly_values[2], None);
    }

    #[test]
    fn test_fallback_to_short_total_label() {
        let grid = grid_with(vec![
            (6, data_row("Total das dormidas em estabelecimentos", None, &[900.0; 12])),
            (7, data_row("Total", Some(12000.0), &[1000.0; 12])),
            (9, data_row("Norte", None, &[1.0; 12])),
        ]);
        let result = scan(&grid, 50.0).unwrap();
        assert_eq!(result.row_index, 7);
        assert_eq!(result.annual_total, Some(12000.0));
    }

    #[test]
    fn test_no_total_anywhere() {
        let grid = grid_with(vec![(9, data_row("Norte", None, &[900.0; 12]))]);
        assert!(matches!(
            scan(&grid, 50.0),
            Err(ExtractError::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_sheet_too_short() {
        let grid = grid_with(vec![(7, data_row("Total", None, &[900.0; 12]))]);
        assert!(matches!(
            scan(&grid, 50.0),
            Err(ExtractError::PatternNotFound { .. })
        ));
    }
}
