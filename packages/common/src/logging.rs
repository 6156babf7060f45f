//! Structured logging with secure handling of credential material
//!
//! Passwords and peppers never reach this module. Stored credential strings
//! do, and are logged only as a short SHA-256 fingerprint so that repeated
//! failures for one record can be correlated without leaking the hash.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Hex characters kept from the SHA-256 digest in a fingerprint
const FINGERPRINT_HEX_LEN: usize = 12;

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Levels come from `RUST_LOG`:
    /// - `RUST_LOG=info` - configuration events and rejected credentials
    /// - `RUST_LOG=debug` - per-derivation timings and rehash decisions
    /// - `RUST_LOG=credhash=debug` - crate-specific level
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are no-ops.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a credential string that could not be decoded or was refused
    pub fn log_rejected_credential(
        operation: &str,
        error: &dyn std::error::Error,
        credential: &str,
    ) {
        let fingerprint = Self::secure_fingerprint(credential);
        info!("Credential rejected by {operation} (credential: {fingerprint}): {error}");
    }

    /// Log the outcome of a rehash check
    pub fn log_rehash_decision(algorithm: &str, credential: &str, reasons: &[String]) {
        let fingerprint = Self::secure_fingerprint(credential);
        if reasons.is_empty() {
            debug!("Rehash not needed: {algorithm} (credential: {fingerprint})");
        } else {
            debug!(
                "Rehash needed: {algorithm} (credential: {fingerprint}, reasons: {})",
                reasons.join("; ")
            );
        }
    }

    /// Log performance metrics and timing information
    pub fn log_performance_metric(operation: &str, duration_ms: u64, success: bool) {
        if success {
            debug!("Performance: {operation} completed in {duration_ms}ms");
        } else {
            warn!("Performance: {operation} failed after {duration_ms}ms");
        }
    }

    /// Log a key derivation failure caused by the environment
    ///
    /// Logs the error type and message; neither carries secret input.
    pub fn log_derivation_failure(operation: &str, error: &dyn std::error::Error) {
        error!(
            "Key derivation failed: {operation} (error_type: {}): {error}",
            std::any::type_name_of_val(error)
        );
    }

    /// Short SHA-256 fingerprint of a sensitive string, `#` plus 12 hex chars
    #[must_use]
    pub fn secure_fingerprint(value: &str) -> String {
        let digest = Sha256::digest(value.as_bytes());
        let hex = format!("{digest:x}");
        format!("#{}", &hex[..FINGERPRINT_HEX_LEN])
    }
}
