//! Secret pepper shared by all credentials of a hasher

use crate::{CredentialError, Result};
use std::fmt;
use std::ops::RangeInclusive;
use zeroize::Zeroizing;

/// Accepted pepper lengths in bytes
pub const PEPPER_LENGTH: RangeInclusive<usize> = 1..=1024;

/// Application-wide secret passed to the primitive's dedicated secret input
///
/// Never stored in the credential; it must be supplied again, out of band,
/// to verify. The bytes are wiped on drop.
#[derive(Clone)]
pub struct Pepper(Zeroizing<Vec<u8>>);

impl Pepper {
    /// Validate and wrap a pepper
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Configuration` when the pepper is empty or
    /// longer than 1024 bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        let secret = Zeroizing::new(secret.into());
        if !PEPPER_LENGTH.contains(&secret.len()) {
            return Err(CredentialError::configuration(format!(
                "pepper length must be between {} and {} bytes",
                PEPPER_LENGTH.start(),
                PEPPER_LENGTH.end()
            )));
        }
        Ok(Self(secret))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pepper([REDACTED])")
    }
}
