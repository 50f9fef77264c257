use chrono::NaiveDate;

use crate::models::{AnnualRecord, ExtractionResult, MonthlyObservation, MONTH_NAMES};

/// Fold one year's extraction into an annual record.
/// A missing annual total becomes the sum of the months that are present.
pub fn annual_record(year: i32, result: &ExtractionResult) -> AnnualRecord {
    let annual_total = result.annual_total.or_else(|| {
        let present: Vec<f64> = result.monthly_values.iter().flatten().copied().collect();
        (!present.is_empty()).then(|| present.iter().sum())
    });

    AnnualRecord::new(
        year,
        annual_total,
        result.matched_label.clone(),
        result.row_index,
        result.sheet_name.clone(),
        result.monthly_values,
    )
}

/// Expand annual records into one observation per present month, sorted by date
pub fn monthly_observations(records: &[AnnualRecord]) -> Vec<MonthlyObservation> {
    let mut observations: Vec<MonthlyObservation> = records
        .iter()
        .flat_map(|record| {
            record
                .months()
                .into_iter()
                .zip(MONTH_NAMES)
                .zip(1u32..)
                .filter_map(move |((value, month_name), month)| {
                    let guests_thousands = value?;
                    let date = NaiveDate::from_ymd_opt(record.year, month, 1)?;
                    Some(MonthlyObservation {
                        date,
                        year: record.year,
                        month,
                        month_name,
                        guests_thousands,
                    })
                })
        })
        .collect();

    observations.sort_by_key(|obs| obs.date);
    observations
}
