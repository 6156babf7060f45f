//! Per-algorithm parameter schemas
//!
//! Each schema is a typed parameter struct plus the rules that decide whether
//! a set of values is acceptable. The same rules run when a credential is
//! serialized and when one is decoded, so neither a misconfigured caller nor
//! a tampered string gets past them.

pub mod argon2;
pub mod scrypt;

pub use argon2::Argon2Params;
pub use scrypt::ScryptParams;

use crate::phc::segments::parse_decimal;
use crate::{Algorithm, CredentialError, Result};
use std::fmt;
use std::ops::RangeInclusive;

/// Largest value representable in 32 bits
pub const MAX_UINT32: u64 = (1 << 32) - 1;

/// Largest value representable in 24 bits
pub const MAX_UINT24: u64 = (1 << 24) - 1;

/// Accepted salt lengths in bytes, for every algorithm
pub const SALT_LENGTH: RangeInclusive<usize> = 8..=1024;

/// Salt length used for new credentials unless configured otherwise
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Validation rules for one algorithm's parameters
pub trait ParamSchema: Clone + fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Algorithm these parameters belong to
    const ALGORITHM: Algorithm;

    /// Version tag written into new credentials
    const CURRENT_VERSION: Option<u32>;

    /// Accepted hash (derived key) lengths in bytes
    const HASH_LENGTH: RangeInclusive<usize>;

    /// Resolve a decoded version tag, applying the algorithm's default when absent
    ///
    /// # Errors
    ///
    /// Returns an error when the tag is not one the algorithm accepts.
    fn resolve_version(version: Option<u32>) -> Result<Option<u32>>;

    /// Check single-field bounds and cross-field invariants
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Validation` describing the first violated rule.
    fn validate(&self) -> Result<()>;

    /// Parameters as `(key, value)` pairs in declaration order
    fn to_fields(&self) -> Vec<(&'static str, u64)>;

    /// Build and validate parameters from decoded `(key, value)` pairs
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Format` for unknown, missing or non-integer
    /// fields and `CredentialError::Validation` for out-of-range values.
    fn from_fields(fields: &[(String, String)]) -> Result<Self>;
}

/// Read exactly the declared keys from decoded fields, in declaration order
pub(crate) fn read_fields<const N: usize>(
    algorithm: Algorithm,
    fields: &[(String, String)],
    keys: [&'static str; N],
) -> Result<[u64; N]> {
    let mut values: [Option<u64>; N] = [None; N];

    for (key, raw) in fields {
        let slot = keys.iter().position(|k| k == key).ok_or_else(|| {
            CredentialError::format(format!("unknown {algorithm} parameter `{key}`"))
        })?;
        if values[slot].is_some() {
            return Err(CredentialError::format(format!(
                "duplicate parameter `{key}`"
            )));
        }
        values[slot] = Some(parse_decimal(raw).ok_or_else(|| {
            CredentialError::format(format!("parameter `{key}` must be an unsigned integer"))
        })?);
    }

    let mut out = [0u64; N];
    for (index, value) in values.iter().enumerate() {
        out[index] = value.ok_or_else(|| {
            CredentialError::format(format!(
                "missing {algorithm} parameter `{}`",
                keys[index]
            ))
        })?;
    }
    Ok(out)
}

/// Narrow a decoded value to `u32`
pub(crate) fn to_u32(key: &str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        CredentialError::validation(format!("`{key}` must not exceed {MAX_UINT32}"))
    })
}
