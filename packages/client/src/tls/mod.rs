//! TLS client configuration

pub mod config;
pub mod insecure;

pub use config::client_config;
pub use insecure::AcceptAnyCertificate;
