use std::env;
use std::path::PathBuf;

use crate::extractors::format::DEFAULT_PLAUSIBILITY_THRESHOLD;
use crate::extractors::ExtractOptions;

pub const FIRST_REPORT_YEAR: i32 = 2014;
pub const LAST_REPORT_YEAR: i32 = 2023;
/// Reports up to this year were published as legacy .xls workbooks
const LAST_XLS_YEAR: i32 = 2015;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Input files are named `<file_prefix>_<year>.xls[x]`
    pub file_prefix: String,
    /// Output tables are named `<output_prefix>_<table>_specialized.csv`
    pub output_prefix: String,
    pub start_year: i32,
    pub end_year: i32,
    pub plausibility_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_dir: PathBuf::from("sources"),
            output_dir: PathBuf::from("data"),
            file_prefix: "ET".to_string(),
            output_prefix: "portugal_tourism".to_string(),
            start_year: FIRST_REPORT_YEAR,
            end_year: LAST_REPORT_YEAR,
            plausibility_threshold: DEFAULT_PLAUSIBILITY_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            source_dir: env::var("SOURCE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.source_dir),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            file_prefix: env::var("FILE_PREFIX").unwrap_or(defaults.file_prefix),
            output_prefix: env::var("OUTPUT_PREFIX").unwrap_or(defaults.output_prefix),
            start_year: env::var("START_YEAR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.start_year),
            end_year: env::var("END_YEAR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.end_year),
            plausibility_threshold: env::var("PLAUSIBILITY_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.plausibility_threshold),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.start_year > self.end_year {
            return Err(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            ));
        }
        Ok(())
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    pub fn input_path(&self, year: i32) -> PathBuf {
        let extension = if year <= LAST_XLS_YEAR { "xls" } else { "xlsx" };
        self.source_dir
            .join(format!("{}_{year}.{extension}", self.file_prefix))
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            plausibility_threshold: self.plausibility_threshold,
        }
    }
}
