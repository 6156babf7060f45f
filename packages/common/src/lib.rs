//! Common infrastructure shared by the credhash crates
//!
//! Structured logging through `log` and `env_logger`, with credential
//! strings and other sensitive values reduced to SHA-256 fingerprints
//! before they reach a log line.

#![forbid(unsafe_code)]

pub mod logging;

pub use logging::LoggingTransformer;
