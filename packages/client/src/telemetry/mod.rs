//! Dialer telemetry

pub mod dial_stats;

pub use dial_stats::{DialStats, DialStatsSnapshot};
