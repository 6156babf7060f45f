//! Argon2id parameters (RFC 9106 section 3.1)

use super::{MAX_UINT24, MAX_UINT32, ParamSchema, read_fields, to_u32};
use crate::{Algorithm, CredentialError, Result};

/// Argon2 version 0x10, assumed for legacy strings without a `v=` segment
pub const VERSION_0X10: u32 = 16;

/// Argon2 version 0x13, written into every new credential
pub const VERSION_0X13: u32 = 19;

const KEYS: [&str; 3] = ["memory", "passes", "parallelism"];

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argon2Params {
    /// Memory size in KiB
    pub memory: u32,
    /// Number of passes over memory
    pub passes: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Argon2Params {
    /// Create parameters without validating them
    #[must_use]
    pub const fn new(memory: u32, passes: u32, parallelism: u32) -> Self {
        Self {
            memory,
            passes,
            parallelism,
        }
    }
}

impl ParamSchema for Argon2Params {
    const ALGORITHM: Algorithm = Algorithm::Argon2id;
    const CURRENT_VERSION: Option<u32> = Some(VERSION_0X13);
    const HASH_LENGTH: std::ops::RangeInclusive<usize> = 4..=(MAX_UINT32 as usize);

    fn resolve_version(version: Option<u32>) -> Result<Option<u32>> {
        match version {
            None => Ok(Some(VERSION_0X10)),
            Some(v @ (VERSION_0X10 | VERSION_0X13)) => Ok(Some(v)),
            Some(other) => Err(CredentialError::validation(format!(
                "unsupported argon2 version {other}"
            ))),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.passes < 1 {
            return Err(CredentialError::validation("passes must be at least 1"));
        }
        if self.parallelism < 1 || u64::from(self.parallelism) > MAX_UINT24 {
            return Err(CredentialError::validation(format!(
                "parallelism must be between 1 and {MAX_UINT24}"
            )));
        }
        if u64::from(self.memory) < 8 * u64::from(self.parallelism) {
            return Err(CredentialError::validation(
                "memory parameter must be at least 8 * parallelism",
            ));
        }
        Ok(())
    }

    fn to_fields(&self) -> Vec<(&'static str, u64)> {
        vec![
            (KEYS[0], u64::from(self.memory)),
            (KEYS[1], u64::from(self.passes)),
            (KEYS[2], u64::from(self.parallelism)),
        ]
    }

    fn from_fields(fields: &[(String, String)]) -> Result<Self> {
        let [memory, passes, parallelism] = read_fields(Self::ALGORITHM, fields, KEYS)?;
        let params = Self {
            memory: to_u32(KEYS[0], memory)?,
            passes: to_u32(KEYS[1], passes)?,
            parallelism: to_u32(KEYS[2], parallelism)?,
        };
        params.validate()?;
        Ok(params)
    }
}
