use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::models::{AnnualRecord, LogEntry, LogRow, MonthlyObservation, SeriesPoint};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Locations of the four output tables
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub annual: PathBuf,
    pub monthly: PathBuf,
    pub timeseries: PathBuf,
    pub log: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, prefix: &str) -> Self {
        Self {
            annual: output_dir.join(format!("{prefix}_annual_specialized.csv")),
            monthly: output_dir.join(format!("{prefix}_monthly_specialized.csv")),
            timeseries: output_dir.join(format!("{prefix}_ts_specialized.csv")),
            log: output_dir.join("specialized_extraction_log.csv"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_dir, &config.output_prefix)
    }
}

/// Write every table that has rows and return the paths written.
///
/// The annual table is skipped when no year produced data; the monthly and
/// time-series tables are skipped when there are no observations. The log
/// is always written.
pub fn write_tables(
    paths: &OutputPaths,
    annual: &[AnnualRecord],
    monthly: &[MonthlyObservation],
    log: &[LogEntry],
) -> Result<Vec<PathBuf>, OutputError> {
    if let Some(dir) = paths.log.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut written = Vec::new();

    if !annual.is_empty() {
        write_csv(&paths.annual, annual)?;
        info!("Annual data: {}", paths.annual.display());
        written.push(paths.annual.clone());

        if !monthly.is_empty() {
            write_csv(&paths.monthly, monthly)?;
            info!("Monthly data: {}", paths.monthly.display());
            written.push(paths.monthly.clone());

            let series: Vec<SeriesPoint> = monthly.iter().map(SeriesPoint::from).collect();
            write_csv(&paths.timeseries, &series)?;
            info!("Time series: {}", paths.timeseries.display());
            written.push(paths.timeseries.clone());
        }
    }

    let log_rows: Vec<LogRow> = log.iter().map(LogRow::from).collect();
    write_csv(&paths.log, &log_rows)?;
    info!("Extraction log: {}", paths.log.display());
    written.push(paths.log.clone());

    Ok(written)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let to_csv_error = |source: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for row in rows {
        writer.serialize(row).map_err(to_csv_error)?;
    }
    writer.flush()?;
    Ok(())
}
