//! scrypt hasher configuration

use super::{CredentialHasher, HashingConfig, into_configuration};
use crate::kdf::scrypt::primitive_params;
use crate::kdf::{PasswordNormalizer, ScryptKdf, Utf8Normalizer};
use crate::params::{DEFAULT_SALT_LENGTH, ScryptParams};
use crate::{CredentialError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// scrypt hasher
pub type ScryptHasher = CredentialHasher<ScryptKdf>;

/// scrypt tuning options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptOptions {
    /// CPU/memory cost `N`, a power of two
    #[serde(default = "default_cost")]
    pub cost: u32,
    /// Block size `r`
    #[serde(default = "default_block_size")]
    pub block_size: u32,
    /// Parallelization `p`
    #[serde(default = "default_parallelization")]
    pub parallelization: u32,
    /// Derived key length in bytes, 64..=128
    #[serde(default = "default_key_length")]
    pub key_length: u32,
}

impl ScryptOptions {
    /// `N = 2^17`, `r = 8`, `p = 1` (128 MiB), 64-byte key
    pub const RECOMMENDED: Self = Self {
        cost: 1 << 17,
        block_size: 8,
        parallelization: 1,
        key_length: 64,
    };

    /// Cost parameters part of the options
    #[must_use]
    pub const fn params(&self) -> ScryptParams {
        ScryptParams::new(self.cost, self.block_size, self.parallelization)
    }
}

impl Default for ScryptOptions {
    fn default() -> Self {
        Self::RECOMMENDED
    }
}

fn default_cost() -> u32 {
    ScryptOptions::RECOMMENDED.cost
}

fn default_block_size() -> u32 {
    ScryptOptions::RECOMMENDED.block_size
}

fn default_parallelization() -> u32 {
    ScryptOptions::RECOMMENDED.parallelization
}

fn default_key_length() -> u32 {
    ScryptOptions::RECOMMENDED.key_length
}

/// Builder for [`ScryptHasher`]
pub struct ScryptHasherBuilder {
    options: ScryptOptions,
    salt_length: usize,
    normalizer: Arc<dyn PasswordNormalizer>,
}

impl Default for ScryptHasherBuilder {
    fn default() -> Self {
        Self {
            options: ScryptOptions::RECOMMENDED,
            salt_length: DEFAULT_SALT_LENGTH,
            normalizer: Arc::new(Utf8Normalizer),
        }
    }
}

impl ScryptHasherBuilder {
    /// Start from the recommended options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all tuning options at once
    #[must_use]
    pub fn options(mut self, options: ScryptOptions) -> Self {
        self.options = options;
        self
    }

    /// CPU/memory cost `N`
    #[must_use]
    pub fn cost(mut self, cost: u32) -> Self {
        self.options.cost = cost;
        self
    }

    /// Block size `r`
    #[must_use]
    pub fn block_size(mut self, block_size: u32) -> Self {
        self.options.block_size = block_size;
        self
    }

    /// Parallelization `p`
    #[must_use]
    pub fn parallelization(mut self, parallelization: u32) -> Self {
        self.options.parallelization = parallelization;
        self
    }

    /// Derived key length in bytes
    #[must_use]
    pub fn key_length(mut self, key_length: u32) -> Self {
        self.options.key_length = key_length;
        self
    }

    /// Salt length in bytes for new credentials
    #[must_use]
    pub fn salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
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
    /// - cost is below 2 or not a power of two
    /// - block size or parallelization is 0
    /// - parallelization exceeds the maximum for the block size
    /// - `128·r·(N + p)` exceeds the `2·128·r·N` memory ceiling
    /// - `log2(N)` is not below `16·r`
    /// - key length is outside 64..=128
    /// - salt length is outside 8..=1024
    pub fn build(self) -> Result<ScryptHasher> {
        let key_length = usize::try_from(self.options.key_length)
            .map_err(|_| CredentialError::configuration("key length exceeds usize"))?;
        let config = HashingConfig::new(self.options.params(), key_length, self.salt_length)?;
        primitive_params(config.params()).map_err(into_configuration)?;

        tracing::debug!(
            cost = self.options.cost,
            block_size = self.options.block_size,
            parallelization = self.options.parallelization,
            key_length,
            "scrypt hasher configured"
        );
        Ok(CredentialHasher::new(ScryptKdf::new(self.normalizer), config))
    }
}

impl CredentialHasher<ScryptKdf> {
    /// Builder starting from the recommended options
    #[must_use]
    pub fn builder() -> ScryptHasherBuilder {
        ScryptHasherBuilder::new()
    }

    /// Hasher with the given options
    ///
    /// # Errors
    ///
    /// Same as [`ScryptHasherBuilder::build`].
    pub fn with_options(options: ScryptOptions) -> Result<Self> {
        ScryptHasherBuilder::new().options(options).build()
    }

    /// Hasher with [`ScryptOptions::RECOMMENDED`]
    ///
    /// # Errors
    ///
    /// Never fails for the built-in constants.
    pub fn recommended() -> Result<Self> {
        Self::with_options(ScryptOptions::RECOMMENDED)
    }
}
