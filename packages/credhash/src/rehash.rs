//! Rehash policy: stored credential metadata against the current configuration

use crate::hasher::HashingConfig;
use crate::params::ParamSchema;
use crate::phc::Credential;
use std::fmt;

/// Why a stored credential no longer matches the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RehashReason {
    /// Version tag differs from the one new credentials carry
    Version {
        /// Version found in the credential
        stored: Option<u32>,
        /// Version written by the hasher
        current: Option<u32>,
    },
    /// A cost parameter differs
    Parameter {
        /// Parameter key
        name: &'static str,
        /// Value found in the credential
        stored: u64,
        /// Configured value
        configured: u64,
    },
    /// Derived key length differs
    TagLength {
        /// Length found in the credential
        stored: usize,
        /// Configured length
        configured: usize,
    },
}

impl fmt::Display for RehashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version { stored, current } => {
                write!(f, "version {stored:?} != {current:?}")
            }
            Self::Parameter {
                name,
                stored,
                configured,
            } => write!(f, "{name} {stored} != {configured}"),
            Self::TagLength { stored, configured } => {
                write!(f, "tag length {stored} != {configured}")
            }
        }
    }
}

/// List every difference between `stored` and `config`
///
/// Metadata only: no key is derived.
#[must_use]
pub fn rehash_reasons<P: ParamSchema>(
    stored: &Credential<P>,
    config: &HashingConfig<P>,
) -> Vec<RehashReason> {
    let mut reasons = Vec::new();

    if stored.version() != P::CURRENT_VERSION {
        reasons.push(RehashReason::Version {
            stored: stored.version(),
            current: P::CURRENT_VERSION,
        });
    }

    for ((name, stored), (_, configured)) in stored
        .params()
        .to_fields()
        .into_iter()
        .zip(config.params().to_fields())
    {
        if stored != configured {
            reasons.push(RehashReason::Parameter {
                name,
                stored,
                configured,
            });
        }
    }

    if stored.tag_length() != config.tag_length() {
        reasons.push(RehashReason::TagLength {
            stored: stored.tag_length(),
            configured: config.tag_length(),
        });
    }

    reasons
}

/// Whether `stored` should be replaced by a fresh hash under `config`
#[must_use]
pub fn needs_rehash<P: ParamSchema>(stored: &Credential<P>, config: &HashingConfig<P>) -> bool {
    !rehash_reasons(stored, config).is_empty()
}
