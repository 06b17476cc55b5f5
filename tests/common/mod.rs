#![allow(dead_code)]

use chrono::NaiveDate;
use sigperf::domain::error::SigperfError;
pub use sigperf::domain::signal::{Signal, SignalRecord};
use sigperf::ports::data_port::SignalDataPort;

pub struct MockSignalPort {
    pub records: Vec<SignalRecord>,
    pub error: Option<String>,
}

impl MockSignalPort {
    pub fn new(records: Vec<SignalRecord>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            records: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl SignalDataPort for MockSignalPort {
    fn fetch_signals(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<SignalRecord>, SigperfError> {
        if let Some(reason) = &self.error {
            return Err(SigperfError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .records
            .iter()
            .filter(|r| {
                start_date.is_none_or(|start| r.date >= start)
                    && end_date.is_none_or(|end| r.date <= end)
            })
            .cloned()
            .collect())
    }

    fn data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SigperfError> {
        if let Some(reason) = &self.error {
            return Err(SigperfError::Data {
                reason: reason.clone(),
            });
        }
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => {
                Ok(Some((first.date, last.date, self.records.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_record(date_str: &str, close: f64, signal: Signal) -> SignalRecord {
    SignalRecord {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
        signal,
        sma: None,
        z_score: None,
    }
}

/// Alternating BUY/SELL series starting at `start_price`, one record per
/// day, prices stepping by `step`.
pub fn generate_records(start_date: &str, count: usize, start_price: f64, step: f64) -> Vec<SignalRecord> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| SignalRecord {
            date: start + chrono::Duration::days(i as i64),
            close: start_price + i as f64 * step,
            signal: match i % 4 {
                0 => Signal::Buy,
                2 => Signal::Sell,
                _ => Signal::None,
            },
            sma: None,
            z_score: None,
        })
        .collect()
}
