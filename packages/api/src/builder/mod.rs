//! Dialer builder API modules
//!
//! Settings are grouped by concern; all of them extend `DialerBuilder`.

pub mod core;
pub mod policy;
pub mod resolution;
pub mod transport;

pub use self::core::DialerBuilder;
