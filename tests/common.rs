#![allow(dead_code)]

use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;
use tourism_extractor::workbook::Cell;

/// Rows of one fixture sheet, keyed by absolute row index
pub type SheetRows = Vec<(u32, Vec<Cell>)>;

/// Write an .xlsx report with the given sheets
pub fn write_report(path: &Path, sheets: &[(&str, SheetRows)]) {
    let mut workbook = XlsxWorkbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("valid sheet name");

        for (row, cells) in rows {
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet
                            .write_string(*row, col, s.as_str())
                            .expect("Failed to write string cell");
                    }
                    Cell::Number(n) => {
                        worksheet
                            .write_number(*row, col, *n)
                            .expect("Failed to write number cell");
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    workbook.save(path).expect("Failed to save fixture workbook");
}

/// `[label, annual, jan..dec]` with `None` left as a blank cell
pub fn total_row(label: &str, annual: Option<f64>, months: &[Option<f64>]) -> Vec<Cell> {
    let mut cells = vec![Cell::from(label), Cell::from(annual)];
    cells.extend(months.iter().map(|v| Cell::from(*v)));
    cells
}

/// `[label, v1, v2, ...]` as laid out in the 2014-2016 reports
pub fn series_row(label: &str, values: &[f64]) -> Vec<Cell> {
    std::iter::once(Cell::from(label))
        .chain(values.iter().map(|v| Cell::from(*v)))
        .collect()
}

pub fn full_year(values: [f64; 12]) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}
