//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for sigperf.
#[derive(Debug, thiserror::Error)]
pub enum SigperfError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(
        "series not sorted at record {position}: {prev} is not before {next}"
    )]
    UnsortedSeries {
        position: usize,
        prev: NaiveDate,
        next: NaiveDate,
    },

    #[error("non-positive entry price {close} on {date}")]
    NonPositiveEntryPrice { date: NaiveDate, close: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigperfError> for std::process::ExitCode {
    fn from(err: &SigperfError) -> Self {
        let code: u8 = match err {
            SigperfError::Io(_) => 1,
            SigperfError::ConfigParse { .. }
            | SigperfError::ConfigMissing { .. }
            | SigperfError::ConfigInvalid { .. } => 2,
            SigperfError::Data { .. } => 3,
            SigperfError::UnsortedSeries { .. }
            | SigperfError::NonPositiveEntryPrice { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
