//! scrypt parameters (RFC 7914 section 2)

use super::{ParamSchema, read_fields, to_u32};
use crate::{Algorithm, CredentialError, Result};

const KEYS: [&str; 3] = ["cost", "blocksize", "parallelization"];

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScryptParams {
    /// CPU/memory cost `N`, a power of two
    pub cost: u32,
    /// Block size `r`
    pub block_size: u32,
    /// Parallelization `p`
    pub parallelization: u32,
}

impl ScryptParams {
    /// Create parameters without validating them
    #[must_use]
    pub const fn new(cost: u32, block_size: u32, parallelization: u32) -> Self {
        Self {
            cost,
            block_size,
            parallelization,
        }
    }
}

/// Largest parallelization allowed for a block size: `((2^32 - 1) * 32) / (128 * r)`
#[must_use]
pub fn max_parallelization(block_size: u32) -> u64 {
    if block_size == 0 {
        return 0;
    }
    (((1u64 << 32) - 1) * 32) / (128 * u64::from(block_size))
}

impl ParamSchema for ScryptParams {
    const ALGORITHM: Algorithm = Algorithm::Scrypt;
    const CURRENT_VERSION: Option<u32> = None;
    const HASH_LENGTH: std::ops::RangeInclusive<usize> = 64..=128;

    fn resolve_version(version: Option<u32>) -> Result<Option<u32>> {
        match version {
            None => Ok(None),
            Some(_) => Err(CredentialError::format(
                "scrypt credentials do not carry a version segment",
            )),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cost < 2 {
            return Err(CredentialError::validation("cost must be at least 2"));
        }
        if self.block_size < 1 {
            return Err(CredentialError::validation("blocksize must be at least 1"));
        }
        if self.parallelization < 1 {
            return Err(CredentialError::validation(
                "parallelization must be at least 1",
            ));
        }
        if u64::from(self.parallelization) > max_parallelization(self.block_size) {
            return Err(CredentialError::validation(
                "parallelization value exceeds maximum based on blocksize",
            ));
        }
        Ok(())
    }

    fn to_fields(&self) -> Vec<(&'static str, u64)> {
        vec![
            (KEYS[0], u64::from(self.cost)),
            (KEYS[1], u64::from(self.block_size)),
            (KEYS[2], u64::from(self.parallelization)),
        ]
    }

    fn from_fields(fields: &[(String, String)]) -> Result<Self> {
        let [cost, block_size, parallelization] = read_fields(Self::ALGORITHM, fields, KEYS)?;
        let params = Self {
            cost: to_u32(KEYS[0], cost)?,
            block_size: to_u32(KEYS[1], block_size)?,
            parallelization: to_u32(KEYS[2], parallelization)?,
        };
        params.validate()?;
        Ok(params)
    }
}
