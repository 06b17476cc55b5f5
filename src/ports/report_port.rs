//! Report generation port trait.

use crate::domain::error::SigperfError;
use crate::domain::performance::PerformanceSummary;
use crate::domain::series::SeriesSummary;
use crate::domain::trade::TradeReturn;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(
        &self,
        series: &SeriesSummary,
        returns: &[TradeReturn<'_>],
        summary: &PerformanceSummary,
        output_path: &str,
    ) -> Result<(), SigperfError>;
}
