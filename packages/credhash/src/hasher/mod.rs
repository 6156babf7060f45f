//! Credential hashing facade
//!
//! A [`CredentialHasher`] owns an immutable configuration and a key
//! derivation adapter. Every operation is a pure function of
//! (password, credential, configuration); derivations run on tokio's
//! blocking pool so many checks can be in flight without stalling a worker
//! thread. Nothing is cached between calls.

pub mod argon2;
pub mod scrypt;

pub use self::argon2::{Argon2Hasher, Argon2HasherBuilder, Argon2Options};
pub use self::scrypt::{ScryptHasher, ScryptHasherBuilder, ScryptOptions};

use crate::async_result::AsyncCredentialResult;
use crate::entropy::generate_salt;
use crate::kdf::{KeyDerivation, constant_time_compare};
use crate::params::{ParamSchema, SALT_LENGTH};
use crate::phc::Credential;
use crate::rehash::{self, RehashReason};
use crate::{Algorithm, CredentialError, Result};
use credhash_common::LoggingTransformer;
use std::sync::Arc;
use std::time::Instant;
use zeroize::Zeroizing;

/// Validated, immutable hashing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashingConfig<P> {
    params: P,
    tag_length: usize,
    salt_length: usize,
}

impl<P: ParamSchema> HashingConfig<P> {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Configuration` if the parameters violate the
    /// schema, or the tag or salt length is out of range.
    pub fn new(params: P, tag_length: usize, salt_length: usize) -> Result<Self> {
        params.validate().map_err(into_configuration)?;
        if !P::HASH_LENGTH.contains(&tag_length) {
            return Err(CredentialError::configuration(format!(
                "{} tag length must be between {} and {} bytes",
                P::ALGORITHM,
                P::HASH_LENGTH.start(),
                P::HASH_LENGTH.end()
            )));
        }
        if !SALT_LENGTH.contains(&salt_length) {
            return Err(CredentialError::configuration(format!(
                "salt length must be between {} and {} bytes",
                SALT_LENGTH.start(),
                SALT_LENGTH.end()
            )));
        }
        Ok(Self {
            params,
            tag_length,
            salt_length,
        })
    }

    /// Cost parameters for new credentials
    #[must_use]
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Derived key length in bytes
    #[must_use]
    pub fn tag_length(&self) -> usize {
        self.tag_length
    }

    /// Salt length in bytes
    #[must_use]
    pub fn salt_length(&self) -> usize {
        self.salt_length
    }
}

fn into_configuration(error: CredentialError) -> CredentialError {
    match error {
        CredentialError::Validation(msg) | CredentialError::Format(msg) => {
            CredentialError::Configuration(msg)
        }
        other => other,
    }
}

struct Inner<K: KeyDerivation> {
    kdf: K,
    config: HashingConfig<K::Params>,
}

/// Hashes, verifies and audits credentials for one algorithm
pub struct CredentialHasher<K: KeyDerivation> {
    inner: Arc<Inner<K>>,
}

impl<K: KeyDerivation> Clone for CredentialHasher<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: KeyDerivation> std::fmt::Debug for CredentialHasher<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("algorithm", &K::Params::ALGORITHM)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl<K: KeyDerivation> CredentialHasher<K> {
    /// Assemble a hasher from an adapter and a validated configuration
    #[must_use]
    pub fn new(kdf: K, config: HashingConfig<K::Params>) -> Self {
        Self {
            inner: Arc::new(Inner { kdf, config }),
        }
    }

    /// Algorithm this hasher produces and accepts
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        K::Params::ALGORITHM
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &HashingConfig<K::Params> {
        &self.inner.config
    }

    /// Hash `password` into a new PHC credential with a fresh random salt
    ///
    /// Two calls with the same password yield different strings.
    pub fn hash(&self, password: &str) -> AsyncCredentialResult<String> {
        let inner = Arc::clone(&self.inner);
        let password = Zeroizing::new(password.to_owned());
        AsyncCredentialResult::spawn_blocking(move || inner.hash_blocking(&password))
    }

    /// Check `password` against a stored credential
    ///
    /// Malformed, tampered or foreign-algorithm credentials yield `Ok(false)`.
    /// Environment failures such as `ResourceExhausted` are returned as errors.
    pub fn verify(&self, password: &str, credential: &str) -> AsyncCredentialResult<bool> {
        self.verify_with(password, credential, false)
    }

    /// Like [`verify`](Self::verify) but surfaces `Format`, `Validation` and
    /// `AlgorithmMismatch` errors instead of folding them into `false`
    pub fn verify_strict(&self, password: &str, credential: &str) -> AsyncCredentialResult<bool> {
        self.verify_with(password, credential, true)
    }

    /// Whether a stored credential should be regenerated
    ///
    /// `true` for anything that does not decode as this hasher's algorithm,
    /// or that differs from the configuration in version, parameters or tag
    /// length. Derives no key; resolves immediately.
    pub fn needs_rehash(&self, credential: &str) -> AsyncCredentialResult<bool> {
        let needs = match self.rehash_reasons(credential) {
            Ok(reasons) => {
                let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                LoggingTransformer::log_rehash_decision(self.algorithm().id(), credential, &reasons);
                !reasons.is_empty()
            }
            Err(error) => {
                LoggingTransformer::log_rejected_credential("needs_rehash", &error, credential);
                true
            }
        };
        AsyncCredentialResult::ready(Ok(needs))
    }

    /// Differences between a stored credential and the configuration
    ///
    /// # Errors
    ///
    /// Returns the decode error when the credential is malformed or was
    /// produced by another algorithm.
    pub fn rehash_reasons(&self, credential: &str) -> Result<Vec<RehashReason>> {
        let stored = self.decode(credential)?;
        Ok(rehash::rehash_reasons(&stored, &self.inner.config))
    }

    /// Decode a credential, requiring this hasher's algorithm
    ///
    /// # Errors
    ///
    /// - `CredentialError::Format` / `Validation` for malformed strings
    /// - `CredentialError::AlgorithmMismatch` for another algorithm's credential
    pub fn decode(&self, credential: &str) -> Result<Credential<K::Params>> {
        Credential::deserialize(credential)
    }

    fn verify_with(
        &self,
        password: &str,
        credential: &str,
        strict: bool,
    ) -> AsyncCredentialResult<bool> {
        let stored = match self.decode(credential) {
            Ok(stored) => stored,
            Err(error) => {
                LoggingTransformer::log_rejected_credential("verify", &error, credential);
                return AsyncCredentialResult::ready(if strict { Err(error) } else { Ok(false) });
            }
        };

        let inner = Arc::clone(&self.inner);
        let password = Zeroizing::new(password.to_owned());
        AsyncCredentialResult::spawn_blocking(move || {
            match inner.verify_blocking(&password, &stored) {
                Err(error) if !strict && error.is_malformed_credential() => {
                    tracing::warn!(
                        algorithm = %K::Params::ALGORITHM,
                        %error,
                        "credential parameters rejected by the primitive"
                    );
                    Ok(false)
                }
                other => other,
            }
        })
    }
}

impl<K: KeyDerivation> Inner<K> {
    fn hash_blocking(&self, password: &str) -> Result<String> {
        let salt = generate_salt(self.config.salt_length)?;
        let key = self.derive_logged(
            "hash",
            password,
            &salt,
            &self.config.params,
            K::Params::CURRENT_VERSION,
            self.config.tag_length,
        )?;

        Credential::new(
            K::Params::CURRENT_VERSION,
            self.config.params.clone(),
            salt,
            key.to_vec(),
        )
        .serialize()
    }

    fn verify_blocking(&self, password: &str, stored: &Credential<K::Params>) -> Result<bool> {
        let key = self.derive_logged(
            "verify",
            password,
            stored.salt(),
            stored.params(),
            stored.version(),
            stored.tag_length(),
        )?;
        Ok(constant_time_compare(&key, stored.hash()))
    }

    fn derive_logged(
        &self,
        operation: &str,
        password: &str,
        salt: &[u8],
        params: &K::Params,
        version: Option<u32>,
        key_length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let started = Instant::now();
        let result = self
            .kdf
            .derive(password, salt, params, version, key_length);
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let label = format!("{} {operation}", K::Params::ALGORITHM);
        LoggingTransformer::log_performance_metric(&label, elapsed, result.is_ok());
        if let Err(error) = &result {
            if !error.is_malformed_credential() {
                LoggingTransformer::log_derivation_failure(&label, error);
            }
        }
        result
    }
}
