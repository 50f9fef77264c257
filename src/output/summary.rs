use chrono::NaiveDate;
use std::fmt;

use crate::models::{AnnualRecord, MonthlyObservation};

/// Headline figures for a finished run, printed after the tables are written
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub observations: usize,
    pub years: Vec<i32>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Month slots left blank across the extracted years
    pub missing_values: usize,
    pub mean: f64,
    pub peak: (NaiveDate, f64),
    pub trough: (NaiveDate, f64),
}

impl RunSummary {
    /// Summarize a date-sorted observation set; `None` when it is empty.
    /// Peak and trough ties go to the earliest date.
    pub fn new(annual: &[AnnualRecord], monthly: &[MonthlyObservation]) -> Option<Self> {
        let first = monthly.first()?;
        let last = monthly.last()?;

        let mut years: Vec<i32> = monthly.iter().map(|obs| obs.year).collect();
        years.dedup();

        let mut peak = (first.date, first.guests_thousands);
        let mut trough = peak;
        for obs in &monthly[1..] {
            if obs.guests_thousands > peak.1 {
                peak = (obs.date, obs.guests_thousands);
            }
            if obs.guests_thousands < trough.1 {
                trough = (obs.date, obs.guests_thousands);
            }
        }

        let total: f64 = monthly.iter().map(|obs| obs.guests_thousands).sum();
        let missing_values = annual
            .iter()
            .map(|record| record.months().iter().filter(|v| v.is_none()).count())
            .sum();

        Some(Self {
            observations: monthly.len(),
            years,
            first_date: first.date,
            last_date: last.date,
            missing_values,
            mean: total / monthly.len() as f64,
            peak,
            trough,
        })
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years: Vec<String> = self.years.iter().map(i32::to_string).collect();
        writeln!(f, "Total observations: {}", self.observations)?;
        writeln!(f, "Years covered:      {}", years.join(", "))?;
        writeln!(
            f,
            "Date range:         {} to {}",
            self.first_date.format("%Y-%m"),
            self.last_date.format("%Y-%m")
        )?;
        writeln!(f, "Missing values:     {}", self.missing_values)?;
        writeln!(f, "Mean monthly:       {:.1} thousand guests", self.mean)?;
        writeln!(
            f,
            "Peak:               {} ({:.1}k)",
            self.peak.0.format("%Y-%m"),
            self.peak.1
        )?;
        write!(
            f,
            "Low:                {} ({:.1}k)",
            self.trough.0.format("%Y-%m"),
            self.trough.1
        )
    }
}
