//! Argon2id adapter

use super::{KeyDerivation, PasswordNormalizer, Pepper, Utf8Normalizer};
use crate::params::Argon2Params;
use crate::params::argon2::{VERSION_0X10, VERSION_0X13};
use crate::{CredentialError, Result};
use ::argon2::{Algorithm as Variant, Argon2, Block, Params, Version};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Argon2id key derivation with optional pepper
#[derive(Clone)]
pub struct Argon2Kdf {
    pepper: Option<Pepper>,
    normalizer: Arc<dyn PasswordNormalizer>,
}

impl Argon2Kdf {
    /// Create an adapter
    #[must_use]
    pub fn new(pepper: Option<Pepper>, normalizer: Arc<dyn PasswordNormalizer>) -> Self {
        Self { pepper, normalizer }
    }

    /// Whether a pepper is fed into every derivation
    #[must_use]
    pub fn has_pepper(&self) -> bool {
        self.pepper.is_some()
    }
}

impl Default for Argon2Kdf {
    fn default() -> Self {
        Self::new(None, Arc::new(Utf8Normalizer))
    }
}

impl std::fmt::Debug for Argon2Kdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Kdf")
            .field("pepper", &self.pepper)
            .finish_non_exhaustive()
    }
}

impl KeyDerivation for Argon2Kdf {
    type Params = Argon2Params;

    fn derive(
        &self,
        password: &str,
        salt: &[u8],
        params: &Argon2Params,
        version: Option<u32>,
        key_length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let version = match version {
            Some(VERSION_0X10) => Version::V0x10,
            Some(VERSION_0X13) => Version::V0x13,
            other => {
                return Err(CredentialError::validation(format!(
                    "unsupported argon2 version {other:?}"
                )));
            }
        };

        let kdf_params = Params::new(
            params.memory,
            params.passes,
            params.parallelism,
            Some(key_length),
        )
        .map_err(map_argon2_error)?;
        let mut memory = reserve_blocks(kdf_params.block_count())?;

        let argon2 = match &self.pepper {
            Some(pepper) => {
                Argon2::new_with_secret(pepper.expose(), Variant::Argon2id, version, kdf_params)
                    .map_err(map_argon2_error)?
            }
            None => Argon2::new(Variant::Argon2id, version, kdf_params),
        };

        let message = self.normalizer.normalize(password);
        let mut key = Zeroizing::new(vec![0u8; key_length]);
        argon2
            .hash_password_into_with_memory(&message, salt, &mut key, memory.as_mut_slice())
            .map_err(map_argon2_error)?;

        Ok(key)
    }
}

/// Reserve the working memory up front so an oversized request fails cleanly
fn reserve_blocks(count: usize) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    blocks.try_reserve_exact(count).map_err(|e| {
        CredentialError::ResourceExhausted(format!(
            "cannot allocate {count} KiB of argon2 memory: {e}"
        ))
    })?;
    blocks.resize(count, Block::default());
    Ok(blocks)
}

fn map_argon2_error(error: ::argon2::Error) -> CredentialError {
    match error {
        ::argon2::Error::MemoryTooMuch => {
            CredentialError::ResourceExhausted(format!("argon2: {error}"))
        }
        other => CredentialError::validation(format!("argon2 rejected the input: {other}")),
    }
}
