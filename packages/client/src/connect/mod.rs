//! Connection establishment: address parsing, TCP connect and TLS handshake

pub mod address;
pub mod attempt;
pub mod connection;
pub mod network;
pub mod tcp;
pub mod tls;

pub use address::{DialTarget, split_host_port};
pub use attempt::AttemptError;
pub use connection::Connection;
pub use network::Network;
pub use tcp::connect_tcp;
