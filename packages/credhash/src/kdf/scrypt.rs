//! scrypt adapter

use super::{KeyDerivation, PasswordNormalizer, Utf8Normalizer};
use crate::params::ScryptParams;
use crate::{CredentialError, Result};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Output length recorded in `scrypt::Params`; only the crate's own PHC
/// encoder reads it; `scrypt::scrypt` fills whatever buffer it is given.
const PARAMS_OUTPUT_LEN: usize = 32;

/// scrypt key derivation
#[derive(Clone)]
pub struct ScryptKdf {
    normalizer: Arc<dyn PasswordNormalizer>,
}

impl ScryptKdf {
    /// Create an adapter
    #[must_use]
    pub fn new(normalizer: Arc<dyn PasswordNormalizer>) -> Self {
        Self { normalizer }
    }
}

impl Default for ScryptKdf {
    fn default() -> Self {
        Self::new(Arc::new(Utf8Normalizer))
    }
}

impl std::fmt::Debug for ScryptKdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScryptKdf").finish_non_exhaustive()
    }
}

impl KeyDerivation for ScryptKdf {
    type Params = ScryptParams;

    fn derive(
        &self,
        password: &str,
        salt: &[u8],
        params: &ScryptParams,
        _version: Option<u32>,
        key_length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let kdf_params = primitive_params(params)?;
        reserve_memory(params)?;

        let message = self.normalizer.normalize(password);
        let mut key = Zeroizing::new(vec![0u8; key_length]);
        ::scrypt::scrypt(&message, salt, &kdf_params, &mut key)
            .map_err(|e| CredentialError::Derivation(format!("scrypt: {e}")))?;

        Ok(key)
    }
}

/// Bytes scrypt needs for `V` (`128·r·N`) and `B` (`128·r·p`)
fn required_memory(params: &ScryptParams) -> Option<u64> {
    let block = 128u64.checked_mul(u64::from(params.block_size))?;
    block.checked_mul(u64::from(params.cost).checked_add(u64::from(params.parallelization))?)
}

/// Check parameters against what the primitive and the `2·128·r·N`
/// memory ceiling accept, and build the primitive's parameter set
///
/// # Errors
///
/// Returns `CredentialError::Validation` if:
/// - cost is not a power of two
/// - the memory requirement overflows or exceeds the ceiling
/// - `scrypt::Params::new` rejects the combination (e.g. `log2(N) >= 16·r`)
pub(crate) fn primitive_params(params: &ScryptParams) -> Result<::scrypt::Params> {
    if !params.cost.is_power_of_two() {
        return Err(CredentialError::validation(format!(
            "scrypt cost {} is not a power of two",
            params.cost
        )));
    }

    let required = required_memory(params)
        .ok_or_else(|| CredentialError::validation("scrypt memory requirement overflows"))?;
    let ceiling = 256u64
        .checked_mul(u64::from(params.block_size))
        .and_then(|m| m.checked_mul(u64::from(params.cost)))
        .ok_or_else(|| CredentialError::validation("scrypt memory ceiling overflows"))?;
    if required > ceiling {
        return Err(CredentialError::validation(format!(
            "scrypt needs {required} bytes, limit is {ceiling}"
        )));
    }

    // u32::trailing_zeros is at most 31
    let log_n = params.cost.trailing_zeros() as u8;
    ::scrypt::Params::new(
        log_n,
        params.block_size,
        params.parallelization,
        PARAMS_OUTPUT_LEN,
    )
    .map_err(|e| CredentialError::validation(format!("scrypt rejected the parameters: {e}")))
}

/// Check that the host can provide the working memory
fn reserve_memory(params: &ScryptParams) -> Result<()> {
    let exhausted = |detail: String| CredentialError::ResourceExhausted(format!("scrypt: {detail}"));

    let required = required_memory(params)
        .ok_or_else(|| exhausted("memory requirement overflows".to_owned()))?;
    let required = usize::try_from(required)
        .map_err(|_| exhausted(format!("{required} bytes exceeds the address space")))?;
    Vec::<u8>::new()
        .try_reserve_exact(required)
        .map_err(|e| exhausted(format!("cannot allocate {required} bytes: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_requirement_covers_v_and_b() {
        let params = ScryptParams::new(1 << 17, 8, 1);
        assert_eq!(required_memory(&params), Some(1024 * ((1 << 17) + 1)));
        assert!(primitive_params(&params).is_ok());
        assert!(reserve_memory(&params).is_ok());
    }

    #[test]
    fn parallelization_beyond_ceiling_is_a_validation_error() {
        let params = ScryptParams::new(2, 1, 3);
        assert!(matches!(
            primitive_params(&params),
            Err(CredentialError::Validation(_))
        ));
    }

    #[test]
    fn cost_beyond_block_size_limit_is_a_validation_error() {
        // scrypt requires log2(N) < 16·r
        assert!(matches!(
            primitive_params(&ScryptParams::new(1 << 16, 1, 1)),
            Err(CredentialError::Validation(_))
        ));
        assert!(primitive_params(&ScryptParams::new(1 << 15, 1, 1)).is_ok());
    }
}
