//! Typed PHC credential

use super::segments::PhcSegments;
use crate::params::{ParamSchema, SALT_LENGTH};
use crate::{Algorithm, CredentialError, Result};

/// A decoded, schema-checked PHC credential
///
/// Never mutated after creation: a rehash produces a new credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential<P: ParamSchema> {
    algorithm: Algorithm,
    version: Option<u32>,
    params: P,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl<P: ParamSchema> Credential<P> {
    /// Create a credential for `P`'s algorithm
    #[must_use]
    pub fn new(version: Option<u32>, params: P, salt: Vec<u8>, hash: Vec<u8>) -> Self {
        Self {
            algorithm: P::ALGORITHM,
            version,
            params,
            salt,
            hash,
        }
    }

    /// Check version, params, salt and hash against the schema
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Validation` (or `Format` for a version the
    /// algorithm never carries) describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if P::resolve_version(self.version)? != self.version {
            return Err(CredentialError::validation(format!(
                "{} credentials must carry an explicit version",
                P::ALGORITHM
            )));
        }
        self.params.validate()?;
        if !SALT_LENGTH.contains(&self.salt.len()) {
            return Err(CredentialError::validation(format!(
                "salt length must be between {} and {} bytes",
                SALT_LENGTH.start(),
                SALT_LENGTH.end()
            )));
        }
        if !P::HASH_LENGTH.contains(&self.hash.len()) {
            return Err(CredentialError::validation(format!(
                "hash length must be between {} and {} bytes",
                P::HASH_LENGTH.start(),
                P::HASH_LENGTH.end()
            )));
        }
        Ok(())
    }

    /// Encode as a PHC string
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Format` if the credential fails schema
    /// validation or the encoder rejects the id or a param key.
    pub fn serialize(&self) -> Result<String> {
        self.validate().map_err(|error| match error {
            CredentialError::Validation(msg) => CredentialError::Format(msg),
            other => other,
        })?;
        let params = self
            .params
            .to_fields()
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_string()))
            .collect();
        PhcSegments::new(
            self.algorithm.id(),
            self.version,
            params,
            self.salt.clone(),
            self.hash.clone(),
        )
        .encode()
    }

    /// Decode and validate a PHC string
    ///
    /// # Errors
    ///
    /// - `CredentialError::Format` for structural problems or an unknown id
    /// - `CredentialError::AlgorithmMismatch` when the id names another algorithm
    /// - `CredentialError::Validation` for out-of-range values
    pub fn deserialize(text: &str) -> Result<Self> {
        Self::from_segments(PhcSegments::parse(text)?)
    }

    /// Apply the schema to already split segments
    ///
    /// # Errors
    ///
    /// Same as [`Credential::deserialize`].
    pub fn from_segments(segments: PhcSegments) -> Result<Self> {
        let (id, version, fields, salt, hash) = segments.into_parts();
        let algorithm: Algorithm = id.parse()?;
        if algorithm != P::ALGORITHM {
            return Err(CredentialError::AlgorithmMismatch {
                expected: P::ALGORITHM.id(),
                found: algorithm.id(),
            });
        }
        let credential = Self {
            algorithm,
            version: P::resolve_version(version)?,
            params: P::from_fields(&fields)?,
            salt,
            hash,
        };
        credential.validate()?;
        Ok(credential)
    }

    /// Algorithm id found in the credential
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Version tag, after defaulting
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Cost parameters
    #[must_use]
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Salt bytes
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Derived key bytes
    #[must_use]
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Length of the derived key in bytes
    #[must_use]
    pub fn tag_length(&self) -> usize {
        self.hash.len()
    }
}
