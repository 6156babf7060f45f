//! Closed set of supported algorithm identifiers

use crate::{CredentialError, Result};
use std::fmt;
use std::str::FromStr;

/// Password hashing algorithm, identified in PHC strings by its lowercase id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Argon2id (RFC 9106)
    Argon2id,
    /// scrypt (RFC 7914)
    Scrypt,
}

impl Algorithm {
    /// The PHC `id` segment for this algorithm
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Argon2id => "argon2id",
            Self::Scrypt => "scrypt",
        }
    }
}

impl FromStr for Algorithm {
    type Err = CredentialError;

    fn from_str(id: &str) -> Result<Self> {
        match id {
            "argon2id" => Ok(Self::Argon2id),
            "scrypt" => Ok(Self::Scrypt),
            other => Err(CredentialError::format(format!(
                "unsupported algorithm id `{other}`"
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
