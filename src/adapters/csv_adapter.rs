//! CSV signal file adapter.
//!
//! Reads the tabular output of the upstream signal generator: one row
//! per trading day with `date`, `close`, `signal` columns and optional
//! `sma_20` / `z_score` indicator columns, addressed by header name.

use crate::domain::error::SigperfError;
use crate::domain::series::check_sorted;
use crate::domain::signal::{Signal, SignalRecord};
use crate::ports::data_port::SignalDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvSignalAdapter {
    path: PathBuf,
}

impl CsvSignalAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<Vec<SignalRecord>, SigperfError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SigperfError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| SigperfError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();

        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let date_col = column("date").ok_or_else(|| SigperfError::Data {
            reason: "missing date column".into(),
        })?;
        let close_col = column("close").ok_or_else(|| SigperfError::Data {
            reason: "missing close column".into(),
        })?;
        let signal_col = column("signal").ok_or_else(|| SigperfError::Data {
            reason: "missing signal column".into(),
        })?;
        let sma_col = column("sma_20").or_else(|| column("sma"));
        let z_score_col = column("z_score");

        let mut records = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SigperfError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            // Header is row 0 in the file, so data rows start at line 2.
            let line = row + 2;

            let date_str = record.get(date_col).unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                SigperfError::Data {
                    reason: format!("line {}: invalid date {:?}: {}", line, date_str, e),
                }
            })?;

            let close: f64 = record
                .get(close_col)
                .unwrap_or_default()
                .trim()
                .parse()
                .map_err(|e| SigperfError::Data {
                    reason: format!("line {}: invalid close value: {}", line, e),
                })?;
            if close <= 0.0 {
                return Err(SigperfError::Data {
                    reason: format!("line {}: non-positive close {}", line, close),
                });
            }

            let signal_str = record.get(signal_col).unwrap_or_default();
            let signal = Signal::parse(signal_str).ok_or_else(|| SigperfError::Data {
                reason: format!("line {}: unknown signal label {:?}", line, signal_str),
            })?;

            let sma = parse_optional(&record, sma_col, "sma", line)?;
            let z_score = parse_optional(&record, z_score_col, "z_score", line)?;

            records.push(SignalRecord {
                date,
                close,
                signal,
                sma,
                z_score,
            });
        }

        check_sorted(&records)?;
        Ok(records)
    }
}

fn parse_optional(
    record: &csv::StringRecord,
    col: Option<usize>,
    name: &str,
    line: usize,
) -> Result<Option<f64>, SigperfError> {
    let Some(col) = col else {
        return Ok(None);
    };
    let cell = record.get(col).unwrap_or_default().trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse()
        .map(Some)
        .map_err(|e| SigperfError::Data {
            reason: format!("line {}: invalid {} value: {}", line, name, e),
        })
}

impl SignalDataPort for CsvSignalAdapter {
    fn fetch_signals(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<SignalRecord>, SigperfError> {
        let mut records = self.read_all()?;
        records.retain(|r| {
            start_date.is_none_or(|start| r.date >= start)
                && end_date.is_none_or(|end| r.date <= end)
        });
        Ok(records)
    }

    fn data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SigperfError> {
        let records = self.read_all()?;
        match (records.first(), records.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, records.len()))),
            _ => Ok(None),
        }
    }
}
