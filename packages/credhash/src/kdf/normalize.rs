//! Password normalization hook

use zeroize::Zeroizing;

/// Turns a password into the exact bytes fed to the primitive
///
/// Implement this to plug in Unicode normalization (NFKC or similar) so that
/// visually identical passwords typed on different platforms derive the same
/// key. The same normalizer must be used for hashing and verification.
pub trait PasswordNormalizer: Send + Sync {
    /// Produce the message bytes for `password`
    fn normalize(&self, password: &str) -> Zeroizing<Vec<u8>>;
}

/// Default normalizer: the password's UTF-8 bytes, unchanged
///
/// No Unicode normalization is applied. Credentials produced by systems that
/// normalize (NFKC or similar) before derivation will not verify here for
/// non-ASCII passwords unless a matching normalizer is set on the builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8Normalizer;

impl PasswordNormalizer for Utf8Normalizer {
    fn normalize(&self, password: &str) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(password.as_bytes().to_vec())
    }
}
