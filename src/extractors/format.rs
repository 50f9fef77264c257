use std::fmt;

use crate::extractors::{label_scan, special, standard, ExtractError};
use crate::models::ExtractionResult;
use crate::workbook::Workbook;

/// Average below which a 2022 row is taken for ratios rather than guest counts
pub const DEFAULT_PLAUSIBILITY_THRESHOLD: f64 = 50.0;

/// Tunables shared by all strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    pub plausibility_threshold: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            plausibility_threshold: DEFAULT_PLAUSIBILITY_THRESHOLD,
        }
    }
}

/// Report layout families, one per run of years sharing a sheet structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// 2014-2015: "Q1" sheets
    QSeries,
    /// 2016: "611" sheets
    NumericCode,
    /// 2017-2021 and 2023: sheet "2.1"
    Standard,
    /// 2022: sheet "3.1"
    Special,
}

impl FormatFamily {
    pub fn for_year(year: i32) -> Self {
        match year {
            ..=2015 => FormatFamily::QSeries,
            2016 => FormatFamily::NumericCode,
            2022 => FormatFamily::Special,
            _ => FormatFamily::Standard,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FormatFamily::QSeries => "2014-2015 format (Q1, Q2... sheets)",
            FormatFamily::NumericCode => "2016 format (611, 612... sheets)",
            FormatFamily::Standard => "standard format (2.1 sheet)",
            FormatFamily::Special => "2022 special format (sheet 3.1)",
        }
    }

    pub fn extract(
        &self,
        workbook: &mut dyn Workbook,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        match self {
            FormatFamily::QSeries => {
                label_scan::extract(workbook, &label_scan::Q_SERIES_SHEETS)
            }
            FormatFamily::NumericCode => {
                label_scan::extract(workbook, &label_scan::NUMERIC_CODE_SHEETS)
            }
            FormatFamily::Standard => standard::extract(workbook),
            FormatFamily::Special => special::extract(workbook, options.plausibility_threshold),
        }
    }
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_mapping_covers_decade() {
        let families: Vec<FormatFamily> = (2014..=2023).map(FormatFamily::for_year).collect();
        assert_eq!(
            families,
            vec![
                FormatFamily::QSeries,
                FormatFamily::QSeries,
                FormatFamily::NumericCode,
                FormatFamily::Standard,
                FormatFamily::Standard,
                FormatFamily::Standard,
                FormatFamily::Standard,
                FormatFamily::Standard,
                FormatFamily::Special,
                FormatFamily::Standard,
            ]
        );
    }

    #[test]
    fn test_years_outside_decade() {
        assert_eq!(FormatFamily::for_year(2010), FormatFamily::QSeries);
        assert_eq!(FormatFamily::for_year(2024), FormatFamily::Standard);
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(ExtractOptions::default().plausibility_threshold, 50.0);
    }
}
