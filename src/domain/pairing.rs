//! Trade pairing engine: matches BUY records to later SELL records.

use super::error::SigperfError;
use super::series::check_sorted;
use super::signal::SignalRecord;

/// A matched round trip: a BUY record and the SELL record that closes
/// it. Borrows the underlying records; a trade is a derived view, never
/// an owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade<'a> {
    pub entry: &'a SignalRecord,
    pub exit: &'a SignalRecord,
}

impl Trade<'_> {
    /// Calendar days held, entry to exit.
    pub fn holding_days(&self) -> i64 {
        (self.exit.date - self.entry.date).num_days()
    }
}

/// How a SELL record is shared between earlier BUY records.
///
/// `AllowMultiMatch` lets one SELL close every BUY that precedes it with
/// no nearer SELL in between, modelling independent concurrent
/// positions. `ConsumeOnce` retires a SELL after its first match, so
/// each BUY needs its own SELL. Both are defensible readings of a
/// nearest-next-sell strategy; `AllowMultiMatch` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingPolicy {
    #[default]
    AllowMultiMatch,
    ConsumeOnce,
}

impl PairingPolicy {
    pub fn parse(label: &str) -> Option<PairingPolicy> {
        match label.trim().to_lowercase().replace('-', "_").as_str() {
            "allow_multi_match" | "multi" => Some(PairingPolicy::AllowMultiMatch),
            "consume_once" | "once" => Some(PairingPolicy::ConsumeOnce),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PairingPolicy::AllowMultiMatch => "allow_multi_match",
            PairingPolicy::ConsumeOnce => "consume_once",
        }
    }
}

/// Greedy nearest-next-sell pairing over a date-sorted series.
///
/// Each BUY matches the first SELL that comes after it (subject to
/// `policy`); a BUY with no later SELL is an open position and produces
/// no trade. Output is ordered by entry date. The input must already be
/// strictly ascending by date; an unsorted series is a caller error and
/// is never repaired here.
pub fn pair_trades<'a>(
    records: &'a [SignalRecord],
    policy: PairingPolicy,
) -> Result<Vec<Trade<'a>>, SigperfError> {
    check_sorted(records)?;

    let mut trades = Vec::new();
    // First index a ConsumeOnce match may draw its SELL from.
    let mut next_free_sell = 0usize;

    for (i, entry) in records.iter().enumerate() {
        if !entry.is_buy() {
            continue;
        }

        let search_from = match policy {
            PairingPolicy::AllowMultiMatch => i + 1,
            PairingPolicy::ConsumeOnce => (i + 1).max(next_free_sell),
        };

        let matched = records
            .iter()
            .enumerate()
            .skip(search_from)
            .find(|(_, record)| record.is_sell());

        if let Some((j, exit)) = matched {
            // Strict date ordering makes a later index a strictly later
            // date, so exit.date > entry.date holds by construction.
            trades.push(Trade { entry, exit });
            if policy == PairingPolicy::ConsumeOnce {
                next_free_sell = j + 1;
            }
        }
    }

    Ok(trades)
}
