//! Salt generation from the operating system's secure random source

use crate::{CredentialError, Result};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Generate `len` bytes of fresh salt
///
/// # Errors
///
/// Returns `CredentialError::Entropy` if the OS random source fails.
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| CredentialError::Entropy(e.to_string()))?;
    Ok(salt)
}
