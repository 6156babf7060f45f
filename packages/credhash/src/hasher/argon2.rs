//! Argon2id hasher configuration

use super::{CredentialHasher, HashingConfig};
use crate::kdf::{Argon2Kdf, PasswordNormalizer, Pepper, Utf8Normalizer};
use crate::params::{Argon2Params, DEFAULT_SALT_LENGTH};
use crate::{CredentialError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Argon2id hasher
pub type Argon2Hasher = CredentialHasher<Argon2Kdf>;

/// Argon2id tuning options
///
/// Missing fields in a deserialized config fall back to [`Argon2Options::RECOMMENDED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Options {
    /// Memory size in KiB
    #[serde(default = "default_memory")]
    pub memory: u32,
    /// Number of passes
    #[serde(default = "default_passes")]
    pub passes: u32,
    /// Degree of parallelism
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Derived key length in bytes
    #[serde(default = "default_tag_length")]
    pub tag_length: u32,
}

impl Argon2Options {
    /// RFC 9106 section 4, second recommended option: 64 MiB, 3 passes, 4 lanes
    pub const RECOMMENDED: Self = Self {
        memory: 1 << 16,
        passes: 3,
        parallelism: 4,
        tag_length: 32,
    };

    /// Cost parameters part of the options
    #[must_use]
    pub const fn params(&self) -> Argon2Params {
        Argon2Params::new(self.memory, self.passes, self.parallelism)
    }
}

impl Default for Argon2Options {
    fn default() -> Self {
        Self::RECOMMENDED
    }
}

fn default_memory() -> u32 {
    Argon2Options::RECOMMENDED.memory
}

fn default_passes() -> u32 {
    Argon2Options::RECOMMENDED.passes
}

fn default_parallelism() -> u32 {
    Argon2Options::RECOMMENDED.parallelism
}

fn default_tag_length() -> u32 {
    Argon2Options::RECOMMENDED.tag_length
}

/// Builder for [`Argon2Hasher`]; validation happens once, in [`build`](Self::build)
pub struct Argon2HasherBuilder {
    options: Argon2Options,
    salt_length: usize,
    pepper: Option<Zeroizing<Vec<u8>>>,
    normalizer: Arc<dyn PasswordNormalizer>,
}

impl Default for Argon2HasherBuilder {
    fn default() -> Self {
        Self {
            options: Argon2Options::RECOMMENDED,
            salt_length: DEFAULT_SALT_LENGTH,
            pepper: None,
            normalizer: Arc::new(Utf8Normalizer),
        }
    }
}

impl Argon2HasherBuilder {
    /// Start from the recommended options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all tuning options at once
    #[must_use]
    pub fn options(mut self, options: Argon2Options) -> Self {
        self.options = options;
        self
    }

    /// Memory size in KiB
    #[must_use]
    pub fn memory(mut self, memory: u32) -> Self {
        self.options.memory = memory;
        self
    }

    /// Number of passes
    #[must_use]
    pub fn passes(mut self, passes: u32) -> Self {
        self.options.passes = passes;
        self
    }

    /// Degree of parallelism
    #[must_use]
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.options.parallelism = parallelism;
        self
    }

    /// Derived key length in bytes
    #[must_use]
    pub fn tag_length(mut self, tag_length: u32) -> Self {
        self.options.tag_length = tag_length;
        self
    }

    /// Salt length in bytes for new credentials
    #[must_use]
    pub fn salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// Secret pepper fed to Argon2's secret input
    #[must_use]
    pub fn pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.pepper = Some(Zeroizing::new(pepper.into()));
        self
    }

    /// Password normalizer applied before derivation
    #[must_use]
    pub fn normalizer(mut self, normalizer: impl PasswordNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Validate everything and build the hasher
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Configuration` if:
    /// - passes or parallelism is 0, or parallelism exceeds 2^24 - 1
    /// - memory is below 8 * parallelism
    /// - tag length is below 4
    /// - salt length is outside 8..=1024
    /// - the pepper is empty or longer than 1024 bytes
    pub fn build(self) -> Result<Argon2Hasher> {
        let tag_length = usize::try_from(self.options.tag_length)
            .map_err(|_| CredentialError::configuration("tag length exceeds usize"))?;
        let config = HashingConfig::new(self.options.params(), tag_length, self.salt_length)?;
        let pepper = self
            .pepper
            .map(|secret| Pepper::new(secret.to_vec()))
            .transpose()?;

        tracing::debug!(
            memory = self.options.memory,
            passes = self.options.passes,
            parallelism = self.options.parallelism,
            tag_length,
            peppered = pepper.is_some(),
            "argon2id hasher configured"
        );
        Ok(CredentialHasher::new(
            Argon2Kdf::new(pepper, self.normalizer),
            config,
        ))
    }
}

impl CredentialHasher<Argon2Kdf> {
    /// Builder starting from the recommended options
    #[must_use]
    pub fn builder() -> Argon2HasherBuilder {
        Argon2HasherBuilder::new()
    }

    /// Hasher with the given options and no pepper
    ///
    /// # Errors
    ///
    /// Same as [`Argon2HasherBuilder::build`].
    pub fn with_options(options: Argon2Options) -> Result<Self> {
        Argon2HasherBuilder::new().options(options).build()
    }

    /// Hasher with [`Argon2Options::RECOMMENDED`] and no pepper
    ///
    /// # Errors
    ///
    /// Never fails for the built-in constants; the `Result` is kept so
    /// construction has a single validation path.
    pub fn recommended() -> Result<Self> {
        Self::with_options(Argon2Options::RECOMMENDED)
    }

    /// Whether this hasher feeds a pepper into derivation
    #[must_use]
    pub fn is_peppered(&self) -> bool {
        self.inner.kdf.has_pepper()
    }
}
