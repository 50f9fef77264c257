/// Worksheet access for the yearly reports
///
/// Extraction never touches calamine directly: it reads sheets through the
/// `Workbook` trait, which hands out a `Grid` of plain cells addressed by
/// absolute (row, column) positions. `CalamineWorkbook` backs the trait with
/// files on disk, `MemoryWorkbook` with sheets built in code.
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::extractors::ExtractError;

/// A single worksheet cell, reduced to what the row scanners care about
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Numeric value of the cell, if it holds a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Label text as the scanners compare it: trimmed and lowercased.
    /// Empty cells yield an empty label.
    pub fn label(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_lowercase(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Text(
                dt.as_datetime()
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<Option<f64>> for Cell {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Cell::Empty, Cell::Number)
    }
}

/// Rectangular view of one worksheet, indexed from the sheet origin (A1 = (0, 0))
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

static EMPTY: Cell = Cell::Empty;

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a grid from a calamine range, keeping absolute positions even
    /// when the sheet's used area does not start at A1
    pub fn from_range(range: &Range<Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self::default();
        };

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (row, col, data) in range.used_cells() {
            let abs_row = start_row as usize + row;
            let abs_col = start_col as usize + col;

            if rows.len() <= abs_row {
                rows.resize_with(abs_row + 1, Vec::new);
            }
            let cells = &mut rows[abs_row];
            if cells.len() <= abs_col {
                cells.resize(abs_col + 1, Cell::Empty);
            }
            cells[abs_col] = Cell::from(data);
        }

        Self { rows }
    }

    /// Number of rows up to and including the last row holding any cell
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col); anything outside the used area reads as empty
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Trimmed, lowercased text of the row's first column
    pub fn label(&self, row: usize) -> String {
        self.get(row, 0).label()
    }

    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col).as_number()
    }
}

/// A parsed spreadsheet exposing its worksheets by name
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;

    fn grid(&mut self, sheet_name: &str) -> Result<Grid, ExtractError>;

    fn has_sheet(&self, sheet_name: &str) -> bool {
        self.sheet_names().iter().any(|name| name == sheet_name)
    }
}

/// Workbook file read through calamine's format auto-detection (.xls or .xlsx)
pub struct CalamineWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExtractError::FileNotFound(path.to_path_buf()));
        }

        let sheets = open_workbook_auto(path).map_err(|e| ExtractError::Read(e.to_string()))?;
        debug!(
            "Opened {} with {} sheets",
            path.display(),
            sheets.sheet_names().len()
        );

        Ok(Self { sheets })
    }
}

impl Workbook for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn grid(&mut self, sheet_name: &str) -> Result<Grid, ExtractError> {
        let range = self
            .sheets
            .worksheet_range(sheet_name)
            .map_err(|e| ExtractError::Read(format!("{sheet_name}: {e}")))?;
        Ok(Grid::from_range(&range))
    }
}

/// Workbook assembled in memory, sheet by sheet
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, Grid>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.sheets.insert(name.into(), grid);
        self
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn grid(&mut self, sheet_name: &str) -> Result<Grid, ExtractError> {
        self.sheets
            .get(sheet_name)
            .cloned()
            .ok_or_else(|| ExtractError::SheetNotFound(sheet_name.to_string()))
    }
}
