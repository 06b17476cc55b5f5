//! Core domain types and logic.

pub mod signal;
pub mod series;
pub mod pairing;
pub mod trade;
pub mod performance;
pub mod error;
