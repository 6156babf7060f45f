//! Error taxonomy for credential hashing

use thiserror::Error;

/// Credential hashing errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Facade constructed with out-of-range parameters, salt length or pepper
    #[error("Invalid hashing configuration: {0}")]
    Configuration(String),

    /// Malformed PHC string: segments, base64, param keys or values
    #[error("Invalid PHC string - {0}")]
    Format(String),

    /// Decoded parameters violate the algorithm's constraints
    #[error("Invalid credential parameters: {0}")]
    Validation(String),

    /// Credential was produced by a different algorithm
    #[error("Algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch {
        /// Algorithm id the hasher is configured for
        expected: &'static str,
        /// Algorithm id decoded from the credential
        found: &'static str,
    },

    /// The key derivation primitive could not obtain the memory it needs
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Key derivation failed for a reason other than memory
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// The operating system random source failed
    #[error("Random number generation failed: {0}")]
    Entropy(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CredentialError {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a format error
    #[must_use]
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for errors caused by the credential string itself.
    ///
    /// `verify` reports these as `false` and `needs_rehash` as `true`;
    /// everything else is an environment condition and is propagated.
    #[must_use]
    pub fn is_malformed_credential(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::Validation(_) | Self::AlgorithmMismatch { .. }
        )
    }
}

/// Result type for credential operations
pub type Result<T> = std::result::Result<T, CredentialError>;
