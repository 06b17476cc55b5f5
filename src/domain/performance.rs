//! Aggregate performance statistics over a trade-return sequence.

use super::trade::TradeReturn;

/// Statistics that only exist once at least one trade closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStats {
    /// Arithmetic mean of the fractional returns.
    pub average_return: f64,
    /// Sum of the fractional returns. This is a sum of per-trade P&Ls,
    /// not a compounded portfolio return.
    pub total_return: f64,
    /// Fraction of trades with strictly positive return; a flat trade
    /// is not a win.
    pub win_rate: f64,
}

/// Summary of a signal-driven strategy's simulated performance.
///
/// `stats` is `None` exactly when no trades were paired. A caller must
/// check `trade_count` (or `stats`) before reading averages; there is
/// deliberately no zero default that could be mistaken for an observed
/// 0% return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSummary {
    pub trade_count: usize,
    pub stats: Option<ReturnStats>,
}

/// Single-pass reduction of trade returns into a summary.
///
/// Sums run left to right in input order, so results are bit-stable for
/// a given return sequence.
pub fn summarize(returns: &[TradeReturn<'_>]) -> PerformanceSummary {
    if returns.is_empty() {
        return PerformanceSummary {
            trade_count: 0,
            stats: None,
        };
    }

    let mut total = 0.0_f64;
    let mut wins = 0usize;
    for r in returns {
        total += r.fractional_return;
        if r.fractional_return > 0.0 {
            wins += 1;
        }
    }

    let count = returns.len();
    PerformanceSummary {
        trade_count: count,
        stats: Some(ReturnStats {
            average_return: total / count as f64,
            total_return: total,
            win_rate: wins as f64 / count as f64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pairing::Trade;
    use crate::domain::signal::{Signal, SignalRecord};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    // Backing records for borrowed trades; the dates and prices are
    // irrelevant to aggregation, only the fractional returns matter.
    fn backing_records() -> (SignalRecord, SignalRecord) {
        (
            SignalRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                close: 100.0,
                signal: Signal::Buy,
                sma: None,
                z_score: None,
            },
            SignalRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                close: 110.0,
                signal: Signal::Sell,
                sma: None,
                z_score: None,
            },
        )
    }

    fn make_returns<'a>(
        entry: &'a SignalRecord,
        exit: &'a SignalRecord,
        values: &[f64],
    ) -> Vec<TradeReturn<'a>> {
        values
            .iter()
            .map(|&v| TradeReturn {
                trade: Trade { entry, exit },
                fractional_return: v,
            })
            .collect()
    }

    #[test]
    fn summarize_mixed_returns() {
        let (entry, exit) = backing_records();
        let returns = make_returns(&entry, &exit, &[0.10, -0.05, 0.20]);

        let summary = summarize(&returns);
        assert_eq!(summary.trade_count, 3);

        let stats = summary.stats.unwrap();
        assert_relative_eq!(stats.average_return, 0.25 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(stats.total_return, 0.25, max_relative = 1e-12);
        assert_relative_eq!(stats.win_rate, 2.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn summarize_empty_is_tagged_not_zeroed() {
        let summary = summarize(&[]);
        assert_eq!(summary.trade_count, 0);
        assert!(summary.stats.is_none());
    }

    #[test]
    fn breakeven_pair_averages_to_zero() {
        let (entry, exit) = backing_records();
        let returns = make_returns(&entry, &exit, &[0.10, -0.10]);

        let summary = summarize(&returns);
        let stats = summary.stats.unwrap();
        assert_eq!(summary.trade_count, 2);
        assert!(stats.average_return.abs() < 1e-12);
        assert!(stats.total_return.abs() < 1e-12);
        assert_relative_eq!(stats.win_rate, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn flat_trades_are_not_wins() {
        let (entry, exit) = backing_records();
        let returns = make_returns(&entry, &exit, &[0.0, 0.0, 0.10]);

        let stats = summarize(&returns).stats.unwrap();
        assert_relative_eq!(stats.win_rate, 1.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn all_losses_win_rate_zero() {
        let (entry, exit) = backing_records();
        let returns = make_returns(&entry, &exit, &[-0.02, -0.08]);

        let stats = summarize(&returns).stats.unwrap();
        assert!(stats.win_rate.abs() < f64::EPSILON);
        assert_relative_eq!(stats.total_return, -0.10, max_relative = 1e-12);
    }

    #[test]
    fn single_trade_summary() {
        let (entry, exit) = backing_records();
        let returns = make_returns(&entry, &exit, &[0.10]);

        let summary = summarize(&returns);
        let stats = summary.stats.unwrap();
        assert_eq!(summary.trade_count, 1);
        assert_relative_eq!(stats.average_return, 0.10, max_relative = 1e-12);
        assert_relative_eq!(stats.total_return, 0.10, max_relative = 1e-12);
        assert_relative_eq!(stats.win_rate, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn total_is_left_to_right_sum() {
        let (entry, exit) = backing_records();
        let values = [0.1, 0.2, 0.3, -0.15];
        let returns = make_returns(&entry, &exit, &values);

        let expected: f64 = values.iter().fold(0.0, |acc, v| acc + v);
        let stats = summarize(&returns).stats.unwrap();
        assert_eq!(stats.total_return, expected);
    }
}
