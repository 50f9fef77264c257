use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::extractors::{ExtractError, FormatFamily};
use crate::models::{
    AnnualRecord, ExtractionResult, ExtractionStatus, LogEntry, MonthlyObservation,
};
use crate::output::{write_tables, OutputError, OutputPaths, RunSummary};
use crate::services::aggregation::{annual_record, monthly_observations};
use crate::workbook::CalamineWorkbook;

/// Everything a finished run produced
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// One entry per year in range, in year order
    pub log: Vec<LogEntry>,
    pub annual: Vec<AnnualRecord>,
    pub monthly: Vec<MonthlyObservation>,
    pub written: Vec<PathBuf>,
}

impl RunOutcome {
    /// False when no year yielded data
    pub fn is_success(&self) -> bool {
        !self.annual.is_empty()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        RunSummary::new(&self.annual, &self.monthly)
    }
}

/// Drives extraction over the configured years and writes the output tables
pub struct ExtractionService {
    config: Config,
}

impl ExtractionService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open one year's report and run the matching strategy
    pub fn extract_year(&self, year: i32) -> Result<ExtractionResult, ExtractError> {
        let path = self.config.input_path(year);
        let mut workbook = CalamineWorkbook::open(&path)?;

        let family = FormatFamily::for_year(year);
        info!("Processing {} using {}", path.display(), family);

        family.extract(&mut workbook, &self.config.extract_options())
    }

    pub fn run(&self) -> Result<RunOutcome, OutputError> {
        self.run_with_progress(|_| {})
    }

    /// Process every year in order, reporting each log entry as it is made.
    /// A failing year is logged and skipped; only output errors abort the run.
    pub fn run_with_progress(
        &self,
        mut on_year: impl FnMut(&LogEntry),
    ) -> Result<RunOutcome, OutputError> {
        let mut outcome = RunOutcome::default();

        for year in self.config.years() {
            let status = match self.extract_year(year) {
                Ok(result) => {
                    info!(
                        "Found data in sheet '{}', row {} (pattern '{}')",
                        result.sheet_name, result.row_index, result.matched_label
                    );
                    let status = ExtractionStatus::Success {
                        valid_months: result.valid_months(),
                        sheet: result.sheet_name.clone(),
                    };
                    outcome.annual.push(annual_record(year, &result));
                    status
                }
                Err(e) => {
                    match &e {
                        ExtractError::FileNotFound(path) => {
                            warn!("{} not found, skipping", path.display())
                        }
                        ExtractError::Read(_) => warn!("Error processing {}: {}", year, e),
                        _ => {
                            debug!("{}: {}", year, e);
                            warn!("Could not extract data for {}", year);
                        }
                    }
                    e.status()
                }
            };

            let entry = LogEntry { year, status };
            on_year(&entry);
            outcome.log.push(entry);
        }

        outcome.monthly = monthly_observations(&outcome.annual);
        if !outcome.is_success() {
            warn!("No data was extracted successfully");
        }

        let paths = OutputPaths::from_config(&self.config);
        outcome.written = write_tables(&paths, &outcome.annual, &outcome.monthly, &outcome.log)?;

        Ok(outcome)
    }
}
