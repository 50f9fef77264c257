use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Twelve month slots, January first. `None` marks a month the report left blank.
pub type MonthlyValues = [Option<f64>; 12];

/// Values read from the matched row of one yearly report
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub row_index: usize,
    /// Label text that identified the row (lowercased)
    pub matched_label: String,
    pub sheet_name: String,
    pub monthly_values: MonthlyValues,
    pub annual_total: Option<f64>,
}

impl ExtractionResult {
    /// Months carrying a strictly positive count
    pub fn valid_months(&self) -> usize {
        self.monthly_values
            .iter()
            .flatten()
            .filter(|v| **v > 0.0)
            .count()
    }
}

/// Build a full set of month slots from the leading values of a row,
/// padding with `None` and dropping anything past December
pub fn pad_months(values: impl IntoIterator<Item = Option<f64>>) -> MonthlyValues {
    let mut months = [None; 12];
    for (slot, value) in months.iter_mut().zip(values) {
        *slot = value;
    }
    months
}

/// One row of the annual summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Annual_Total")]
    pub annual_total: Option<f64>,
    #[serde(rename = "Extraction_Method")]
    pub extraction_method: String,
    #[serde(rename = "Source_Row")]
    pub source_row: usize,
    #[serde(rename = "Source_Sheet")]
    pub source_sheet: String,
    #[serde(rename = "Jan")]
    pub jan: Option<f64>,
    #[serde(rename = "Feb")]
    pub feb: Option<f64>,
    #[serde(rename = "Mar")]
    pub mar: Option<f64>,
    #[serde(rename = "Apr")]
    pub apr: Option<f64>,
    #[serde(rename = "May")]
    pub may: Option<f64>,
    #[serde(rename = "Jun")]
    pub jun: Option<f64>,
    #[serde(rename = "Jul")]
    pub jul: Option<f64>,
    #[serde(rename = "Aug")]
    pub aug: Option<f64>,
    #[serde(rename = "Sep")]
    pub sep: Option<f64>,
    #[serde(rename = "Oct")]
    pub oct: Option<f64>,
    #[serde(rename = "Nov")]
    pub nov: Option<f64>,
    #[serde(rename = "Dec")]
    pub dec: Option<f64>,
}

impl AnnualRecord {
    pub fn new(
        year: i32,
        annual_total: Option<f64>,
        extraction_method: impl Into<String>,
        source_row: usize,
        source_sheet: impl Into<String>,
        months: MonthlyValues,
    ) -> Self {
        let [jan, feb, mar, apr, may, jun, jul, aug, sep, oct, nov, dec] = months;
        Self {
            year,
            annual_total,
            extraction_method: extraction_method.into(),
            source_row,
            source_sheet: source_sheet.into(),
            jan,
            feb,
            mar,
            apr,
            may,
            jun,
            jul,
            aug,
            sep,
            oct,
            nov,
            dec,
        }
    }

    pub fn months(&self) -> MonthlyValues {
        [
            self.jan, self.feb, self.mar, self.apr, self.may, self.jun, self.jul, self.aug,
            self.sep, self.oct, self.nov, self.dec,
        ]
    }
}

/// One month of the long-format series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyObservation {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Month_Name")]
    pub month_name: &'static str,
    #[serde(rename = "Guests_Thousands")]
    pub guests_thousands: f64,
}

/// Two-column row of the time-series file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Guests")]
    pub guests: f64,
}

impl From<&MonthlyObservation> for SeriesPoint {
    fn from(obs: &MonthlyObservation) -> Self {
        Self {
            date: obs.date,
            guests: obs.guests_thousands,
        }
    }
}

/// Outcome of one year's extraction attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionStatus {
    FileNotFound,
    NoDataFound,
    Success { valid_months: usize, sheet: String },
    Error(String),
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStatus::FileNotFound => write!(f, "FILE NOT FOUND"),
            ExtractionStatus::NoDataFound => write!(f, "NO DATA FOUND"),
            ExtractionStatus::Success {
                valid_months,
                sheet,
            } => write!(f, "SUCCESS - {valid_months}/12 months from {sheet}"),
            ExtractionStatus::Error(msg) => write!(f, "ERROR - {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub year: i32,
    pub status: ExtractionStatus,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.year, self.status)
    }
}

/// Row of the extraction log file; `Status` carries the full log line
#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Status")]
    pub status: String,
}

impl From<&LogEntry> for LogRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            year: entry.year,
            status: entry.to_string(),
        }
    }
}
