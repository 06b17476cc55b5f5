//! Daily signal record representation.

use chrono::NaiveDate;

/// Strategy action label attached to a trading day by the upstream
/// signal generator. `None` is the quiet state, not a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    None,
}

impl Signal {
    /// Parse a CSV label. `NONE`, `HOLD` and the empty cell all mean
    /// no action; anything else is rejected.
    pub fn parse(label: &str) -> Option<Signal> {
        match label.trim().to_uppercase().as_str() {
            "BUY" => Some(Signal::Buy),
            "SELL" => Some(Signal::Sell),
            "" | "NONE" | "HOLD" => Some(Signal::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::None => "NONE",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trading day: close price plus the signal and any indicator
/// decorations the upstream pipeline attached. Immutable input for the
/// whole analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
    pub sma: Option<f64>,
    pub z_score: Option<f64>,
}

impl SignalRecord {
    pub fn is_buy(&self) -> bool {
        self.signal == Signal::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.signal == Signal::Sell
    }
}
