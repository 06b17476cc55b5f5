//! Plain-text report adapter.

use crate::domain::error::SigperfError;
use crate::domain::performance::PerformanceSummary;
use crate::domain::series::SeriesSummary;
use crate::domain::trade::TradeReturn;
use crate::ports::report_port::ReportPort;
use std::fmt::Write as _;
use std::fs;

pub struct TextReportAdapter {
    /// Include the per-trade table, not just the aggregates.
    pub include_trades: bool,
}

impl TextReportAdapter {
    pub fn new(include_trades: bool) -> Self {
        Self { include_trades }
    }

    pub fn render(
        &self,
        series: &SeriesSummary,
        returns: &[TradeReturn<'_>],
        summary: &PerformanceSummary,
    ) -> String {
        let mut out = String::new();

        out.push_str("=== SIGNALS SUMMARY ===\n");
        let _ = writeln!(out, "Records:      {}", series.record_count);
        if let Some((first, last)) = series.date_range {
            let _ = writeln!(out, "Date range:   {} to {}", first, last);
            let _ = writeln!(
                out,
                "Price range:  {:.2} - {:.2}",
                series.close_min, series.close_max
            );
        }
        let _ = writeln!(out, "Buy signals:  {}", series.buy_count);
        if let Some(avg) = series.avg_buy_close {
            let _ = writeln!(out, "  avg close:  {:.2}", avg);
        }
        let _ = writeln!(out, "Sell signals: {}", series.sell_count);
        if let Some(avg) = series.avg_sell_close {
            let _ = writeln!(out, "  avg close:  {:.2}", avg);
        }
        if let (Some(min), Some(max), Some(mean)) = (
            series.z_score_min,
            series.z_score_max,
            series.z_score_mean,
        ) {
            let _ = writeln!(
                out,
                "Z-score:      {:.2} to {:.2} (mean {:.2})",
                min, max, mean
            );
        }

        out.push_str("\n=== STRATEGY PERFORMANCE ===\n");
        let _ = writeln!(out, "Completed trades: {}", summary.trade_count);
        match summary.stats {
            Some(stats) => {
                let _ = writeln!(out, "Average return:   {:.2}%", stats.average_return * 100.0);
                let _ = writeln!(out, "Total return:     {:.2}%", stats.total_return * 100.0);
                let _ = writeln!(out, "Win rate:         {:.2}%", stats.win_rate * 100.0);
            }
            None => {
                out.push_str("No completed trades; return statistics undefined.\n");
            }
        }

        if self.include_trades && !returns.is_empty() {
            out.push_str("\n=== TRADES ===\n");
            out.push_str("entry date   entry      exit date    exit       return\n");
            for r in returns {
                let _ = writeln!(
                    out,
                    "{}   {:>8.2}   {}   {:>8.2}   {:>+7.2}%",
                    r.trade.entry.date,
                    r.trade.entry.close,
                    r.trade.exit.date,
                    r.trade.exit.close,
                    r.fractional_return * 100.0
                );
            }
        }

        out
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        series: &SeriesSummary,
        returns: &[TradeReturn<'_>],
        summary: &PerformanceSummary,
        output_path: &str,
    ) -> Result<(), SigperfError> {
        let content = self.render(series, returns, summary);
        fs::write(output_path, content)?;
        Ok(())
    }
}
