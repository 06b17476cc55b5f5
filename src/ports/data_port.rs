//! Signal data access port trait.

use crate::domain::error::SigperfError;
use crate::domain::signal::SignalRecord;
use chrono::NaiveDate;

pub trait SignalDataPort {
    /// Fetch records within the (inclusive) date window, sorted
    /// strictly ascending by date and already validated.
    fn fetch_signals(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<SignalRecord>, SigperfError>;

    /// First date, last date and record count of the full source, or
    /// `None` when the source holds no records.
    fn data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SigperfError>;
}
