//! Key derivation adapters
//!
//! Thin wrappers around the Argon2id and scrypt primitives behind one
//! `derive(password, salt, params, version, key_length)` contract. Adapters
//! normalize the password, hand the pepper to the primitive's secret input,
//! and report memory failures as `ResourceExhausted`.

pub mod argon2;
pub mod normalize;
pub mod pepper;
pub mod scrypt;

pub use self::argon2::Argon2Kdf;
pub use self::scrypt::ScryptKdf;
pub use normalize::{PasswordNormalizer, Utf8Normalizer};
pub use pepper::Pepper;

use crate::Result;
use crate::params::ParamSchema;
use zeroize::Zeroizing;

/// Uniform key derivation contract
pub trait KeyDerivation: Send + Sync + 'static {
    /// Parameter schema of the underlying algorithm
    type Params: ParamSchema;

    /// Derive `key_length` bytes from `password` and `salt`
    ///
    /// # Errors
    ///
    /// - `CredentialError::Validation` if the primitive rejects the parameters
    /// - `CredentialError::ResourceExhausted` if the required memory cannot be obtained
    /// - `CredentialError::Derivation` for any other primitive failure
    fn derive(
        &self,
        password: &str,
        salt: &[u8],
        params: &Self::Params,
        version: Option<u32>,
        key_length: usize,
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// Constant-time comparison for derived keys
///
/// Unequal lengths return `false` immediately; length is not secret.
#[must_use]
#[inline]
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
