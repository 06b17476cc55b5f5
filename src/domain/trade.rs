//! Per-trade return calculation.

use super::error::SigperfError;
use super::pairing::Trade;

/// A trade together with its realized fractional return,
/// `(exit.close - entry.close) / entry.close`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeReturn<'a> {
    pub trade: Trade<'a>,
    pub fractional_return: f64,
}

/// Compute the fractional return of a single trade.
///
/// An entry close of zero (or below) would turn the division into
/// inf/NaN; it is surfaced as an error instead. Upstream data is
/// expected to carry positive prices, so hitting this means bad input,
/// not a bad trade.
pub fn fractional_return(trade: &Trade<'_>) -> Result<f64, SigperfError> {
    if trade.entry.close <= 0.0 {
        return Err(SigperfError::NonPositiveEntryPrice {
            date: trade.entry.date,
            close: trade.entry.close,
        });
    }
    Ok((trade.exit.close - trade.entry.close) / trade.entry.close)
}

/// Compute returns for a whole trade sequence, preserving order.
/// Fails on the first degenerate entry price.
pub fn compute_returns<'a>(
    trades: &[Trade<'a>],
) -> Result<Vec<TradeReturn<'a>>, SigperfError> {
    trades
        .iter()
        .map(|&trade| {
            Ok(TradeReturn {
                trade,
                fractional_return: fractional_return(&trade)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::{Signal, SignalRecord};
    use chrono::NaiveDate;

    fn make_record(day: u32, close: f64, signal: Signal) -> SignalRecord {
        SignalRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            close,
            signal,
            sma: None,
            z_score: None,
        }
    }

    #[test]
    fn positive_return() {
        let entry = make_record(1, 100.0, Signal::Buy);
        let exit = make_record(2, 110.0, Signal::Sell);
        let trade = Trade {
            entry: &entry,
            exit: &exit,
        };
        let r = fractional_return(&trade).unwrap();
        assert!((r - 0.10).abs() < 1e-12);
    }

    #[test]
    fn negative_return() {
        let entry = make_record(1, 110.0, Signal::Buy);
        let exit = make_record(2, 99.0, Signal::Sell);
        let trade = Trade {
            entry: &entry,
            exit: &exit,
        };
        let r = fractional_return(&trade).unwrap();
        assert!((r - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn flat_return_is_zero() {
        let entry = make_record(1, 100.0, Signal::Buy);
        let exit = make_record(2, 100.0, Signal::Sell);
        let trade = Trade {
            entry: &entry,
            exit: &exit,
        };
        let r = fractional_return(&trade).unwrap();
        assert!(r.abs() < f64::EPSILON);
    }

    #[test]
    fn zero_entry_price_is_an_error() {
        let entry = make_record(1, 0.0, Signal::Buy);
        let exit = make_record(2, 100.0, Signal::Sell);
        let trade = Trade {
            entry: &entry,
            exit: &exit,
        };
        let err = fractional_return(&trade).unwrap_err();
        assert!(matches!(
            err,
            SigperfError::NonPositiveEntryPrice { close, .. } if close == 0.0
        ));
    }

    #[test]
    fn negative_entry_price_is_an_error() {
        let entry = make_record(1, -5.0, Signal::Buy);
        let exit = make_record(2, 100.0, Signal::Sell);
        let trade = Trade {
            entry: &entry,
            exit: &exit,
        };
        assert!(fractional_return(&trade).is_err());
    }

    #[test]
    fn compute_returns_preserves_order() {
        let records = [
            make_record(1, 100.0, Signal::Buy),
            make_record(2, 110.0, Signal::Sell),
            make_record(3, 110.0, Signal::Buy),
            make_record(4, 99.0, Signal::Sell),
        ];
        let trades = vec![
            Trade {
                entry: &records[0],
                exit: &records[1],
            },
            Trade {
                entry: &records[2],
                exit: &records[3],
            },
        ];

        let returns = compute_returns(&trades).unwrap();
        assert_eq!(returns.len(), 2);
        assert!((returns[0].fractional_return - 0.10).abs() < 1e-12);
        assert!((returns[1].fractional_return - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn compute_returns_fails_on_first_bad_entry() {
        let records = [
            make_record(1, 0.0, Signal::Buy),
            make_record(2, 110.0, Signal::Sell),
        ];
        let trades = vec![Trade {
            entry: &records[0],
            exit: &records[1],
        }];
        assert!(compute_returns(&trades).is_err());
    }
}
