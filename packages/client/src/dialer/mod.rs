//! Dial orchestration: resolve, filter, try candidates in order, remember
//! the winner

pub mod core;
mod dial;
mod setup;

pub use self::core::Dialer;
