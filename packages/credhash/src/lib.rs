//! Password credential hashing with self-describing PHC strings
//!
//! Argon2id and scrypt behind one facade: hash a password into a PHC string,
//! verify a password against a stored string, and decide whether a stored
//! string should be regenerated under the current configuration.
//!
//! ```no_run
//! use credhash::{Credhash, Hashing};
//!
//! # async fn demo() -> credhash::Result<()> {
//! let hasher = Credhash::argon2id().memory(19 * 1024).passes(2).parallelism(1).build()?;
//! let stored = hasher.hash("correct horse").await?;
//! assert!(hasher.verify("correct horse", &stored).await?);
//! assert!(!hasher.needs_rehash(&stored).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod async_result;
pub mod entropy;
pub mod error;
pub mod hasher;
pub mod kdf;
pub mod params;
pub mod phc;
pub mod rehash;

pub use algorithm::Algorithm;
pub use async_result::AsyncCredentialResult;
pub use error::{CredentialError, Result};
pub use hasher::{
    Argon2Hasher, Argon2HasherBuilder, Argon2Options, CredentialHasher, HashingConfig,
    ScryptHasher, ScryptHasherBuilder, ScryptOptions,
};
pub use kdf::{KeyDerivation, PasswordNormalizer, Pepper, Utf8Normalizer};
pub use params::{Argon2Params, ParamSchema, ScryptParams};
pub use phc::{Credential, PhcSegments};
pub use rehash::RehashReason;

/// Algorithm-independent credential operations
///
/// Lets callers hold a `Box<dyn Hashing>` picked from configuration.
pub trait Hashing: Send + Sync {
    /// Algorithm this hasher produces and accepts
    fn algorithm(&self) -> Algorithm;

    /// Hash a password into a new PHC string
    fn hash(&self, password: &str) -> AsyncCredentialResult<String>;

    /// Check a password against a stored PHC string
    fn verify(&self, password: &str, credential: &str) -> AsyncCredentialResult<bool>;

    /// Whether a stored PHC string should be regenerated
    fn needs_rehash(&self, credential: &str) -> AsyncCredentialResult<bool>;
}

impl<K: KeyDerivation> Hashing for CredentialHasher<K> {
    fn algorithm(&self) -> Algorithm {
        CredentialHasher::algorithm(self)
    }

    fn hash(&self, password: &str) -> AsyncCredentialResult<String> {
        CredentialHasher::hash(self, password)
    }

    fn verify(&self, password: &str, credential: &str) -> AsyncCredentialResult<bool> {
        CredentialHasher::verify(self, password, credential)
    }

    fn needs_rehash(&self, credential: &str) -> AsyncCredentialResult<bool> {
        CredentialHasher::needs_rehash(self, credential)
    }
}

/// Main entry point
pub struct Credhash;

impl Credhash {
    /// Argon2id hasher builder, starting from the recommended options
    #[must_use]
    pub fn argon2id() -> Argon2HasherBuilder {
        Argon2HasherBuilder::new()
    }

    /// scrypt hasher builder, starting from the recommended options
    #[must_use]
    pub fn scrypt() -> ScryptHasherBuilder {
        ScryptHasherBuilder::new()
    }

    /// Hasher for `algorithm` with its recommended options
    ///
    /// # Errors
    ///
    /// Never fails for the built-in options.
    pub fn recommended(algorithm: Algorithm) -> Result<Box<dyn Hashing>> {
        Ok(match algorithm {
            Algorithm::Argon2id => Box::new(Argon2Hasher::recommended()?),
            Algorithm::Scrypt => Box::new(ScryptHasher::recommended()?),
        })
    }
}
