//! Series ordering validation and descriptive summary.

use super::error::SigperfError;
use super::signal::SignalRecord;
use chrono::NaiveDate;

/// Verify the strictly-ascending date invariant. Sorting is the
/// caller's responsibility; a violation fails fast with the offending
/// position rather than being repaired here.
pub fn check_sorted(records: &[SignalRecord]) -> Result<(), SigperfError> {
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(SigperfError::UnsortedSeries {
                position: i + 1,
                prev: pair[0].date,
                next: pair[1].date,
            });
        }
    }
    Ok(())
}

/// Descriptive statistics over a loaded series: counts, ranges, and
/// per-signal averages. Purely informational, independent of pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub record_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub close_min: f64,
    pub close_max: f64,
    pub buy_count: usize,
    pub sell_count: usize,
    pub avg_buy_close: Option<f64>,
    pub avg_sell_close: Option<f64>,
    pub z_score_min: Option<f64>,
    pub z_score_max: Option<f64>,
    pub z_score_mean: Option<f64>,
}

impl SeriesSummary {
    pub fn compute(records: &[SignalRecord]) -> Self {
        let mut close_min = f64::INFINITY;
        let mut close_max = f64::NEG_INFINITY;
        let mut buy_count = 0usize;
        let mut sell_count = 0usize;
        let mut buy_close_total = 0.0_f64;
        let mut sell_close_total = 0.0_f64;
        let mut z_min = f64::INFINITY;
        let mut z_max = f64::NEG_INFINITY;
        let mut z_total = 0.0_f64;
        let mut z_count = 0usize;

        for record in records {
            close_min = close_min.min(record.close);
            close_max = close_max.max(record.close);

            if record.is_buy() {
                buy_count += 1;
                buy_close_total += record.close;
            } else if record.is_sell() {
                sell_count += 1;
                sell_close_total += record.close;
            }

            if let Some(z) = record.z_score {
                z_min = z_min.min(z);
                z_max = z_max.max(z);
                z_total += z;
                z_count += 1;
            }
        }

        let date_range = match (records.first(), records.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        };

        SeriesSummary {
            record_count: records.len(),
            date_range,
            close_min,
            close_max,
            buy_count,
            sell_count,
            avg_buy_close: (buy_count > 0).then(|| buy_close_total / buy_count as f64),
            avg_sell_close: (sell_count > 0).then(|| sell_close_total / sell_count as f64),
            z_score_min: (z_count > 0).then_some(z_min),
            z_score_max: (z_count > 0).then_some(z_max),
            z_score_mean: (z_count > 0).then(|| z_total / z_count as f64),
        }
    }
}
