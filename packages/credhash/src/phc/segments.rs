//! Raw PHC segment layer
//!
//! `$<id>[$v=<version>]$<k1>=<v1>,<k2>=<v2>,...$<salt>$<hash>` with salt and
//! hash in unpadded base64url. This layer knows nothing about algorithms: it
//! checks structure and character sets only. Parameter values are kept as
//! text and interpreted by the algorithm's schema.

use crate::{CredentialError, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use std::fmt::Write as _;

const DELIMITER: char = '$';
const VERSION_PREFIX: &str = "v=";
const MAX_NAME_LENGTH: usize = 32;

/// A PHC string split into its segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhcSegments {
    id: String,
    version: Option<u32>,
    params: Vec<(String, String)>,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl PhcSegments {
    /// Assemble segments for encoding
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        version: Option<u32>,
        params: Vec<(String, String)>,
        salt: Vec<u8>,
        hash: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            version,
            params,
            salt,
            hash,
        }
    }

    /// Split a PHC string into segments
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Format` if:
    /// - the string does not start with `$` or has too few or too many segments
    /// - the id, a param name or a param value uses invalid characters
    /// - the version is not a canonical decimal
    /// - a param key is repeated
    /// - salt or hash are not valid unpadded base64url
    pub fn parse(text: &str) -> Result<Self> {
        let rest = text
            .strip_prefix(DELIMITER)
            .ok_or_else(|| CredentialError::format("must start with `$`"))?;
        let mut segments = rest.split(DELIMITER);

        let id = segments
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CredentialError::format("missing algorithm id"))?;
        check_id(id)?;

        let mut next = segments.next();
        let version = match next.and_then(|segment| segment.strip_prefix(VERSION_PREFIX)) {
            Some(digits) => {
                let version = parse_version(digits)?;
                next = segments.next();
                Some(version)
            }
            None => None,
        };

        let params = parse_params(
            next.ok_or_else(|| CredentialError::format("missing parameters segment"))?,
        )?;
        let salt = decode_b64(
            segments
                .next()
                .ok_or_else(|| CredentialError::format("missing salt segment"))?,
            "salt",
        )?;
        let hash = decode_b64(
            segments
                .next()
                .ok_or_else(|| CredentialError::format("missing hash segment"))?,
            "hash",
        )?;

        if segments.next().is_some() {
            return Err(CredentialError::format("too many segments"));
        }

        Ok(Self {
            id: id.to_owned(),
            version,
            params,
            salt,
            hash,
        })
    }

    /// Encode the segments as a PHC string
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Format` if the id is not lowercase
    /// alphanumeric, a param key is not lowercase, a param value uses
    /// characters outside the PHC value alphabet, or a key is repeated.
    pub fn encode(&self) -> Result<String> {
        check_id(&self.id)?;
        if self.params.is_empty() {
            return Err(CredentialError::format("at least one parameter is required"));
        }

        let mut out = String::with_capacity(
            self.id.len() + 64 + (self.salt.len() + self.hash.len()) * 4 / 3,
        );
        out.push(DELIMITER);
        out.push_str(&self.id);

        if let Some(version) = self.version {
            out.push(DELIMITER);
            out.push_str(VERSION_PREFIX);
            let _ = write!(out, "{version}");
        }

        out.push(DELIMITER);
        for (index, (key, value)) in self.params.iter().enumerate() {
            check_param(key, value)?;
            if self.params[..index].iter().any(|(seen, _)| seen == key) {
                return Err(CredentialError::format(format!(
                    "duplicate parameter `{key}`"
                )));
            }
            if index > 0 {
                out.push(',');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }

        out.push(DELIMITER);
        out.push_str(&URL_SAFE_NO_PAD.encode(&self.salt));
        out.push(DELIMITER);
        out.push_str(&URL_SAFE_NO_PAD.encode(&self.hash));

        Ok(out)
    }

    /// Algorithm id segment
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version tag, if the string carried a `v=` segment
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Parameters in the order they appeared
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Decoded salt bytes
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Decoded hash bytes
    #[must_use]
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub(crate) fn into_parts(self) -> (String, Option<u32>, Vec<(String, String)>, Vec<u8>, Vec<u8>) {
        (self.id, self.version, self.params, self.salt, self.hash)
    }
}

/// Parse a canonical unsigned decimal: digits only, no sign, no leading zeros
pub(crate) fn parse_decimal(text: &str) -> Option<u64> {
    let canonical = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));
    if canonical { text.parse().ok() } else { None }
}

fn parse_version(text: &str) -> Result<u32> {
    parse_decimal(text)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| CredentialError::format(format!("invalid version `{text}`")))
}

fn parse_params(segment: &str) -> Result<Vec<(String, String)>> {
    let mut params: Vec<(String, String)> = Vec::new();
    for pair in segment.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CredentialError::format(format!("parameter `{pair}` has no value")))?;
        check_param(key, value)?;
        if params.iter().any(|(seen, _)| seen == key) {
            return Err(CredentialError::format(format!(
                "duplicate parameter `{key}`"
            )));
        }
        params.push((key.to_owned(), value.to_owned()));
    }
    Ok(params)
}

fn check_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= MAX_NAME_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(CredentialError::format(format!(
            "id `{id}` must be 1-{MAX_NAME_LENGTH} lowercase alphanumeric characters"
        )))
    }
}

fn check_param(key: &str, value: &str) -> Result<()> {
    let key_valid = !key.is_empty()
        && key.len() <= MAX_NAME_LENGTH
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !key_valid {
        return Err(CredentialError::format(format!(
            "parameter key `{key}` must be lowercase"
        )));
    }

    let value_valid = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b'+' | b'.' | b'-'));
    if !value_valid {
        return Err(CredentialError::format(format!(
            "parameter `{key}` has an invalid value"
        )));
    }
    Ok(())
}

fn decode_b64(segment: &str, field: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| CredentialError::format(format!("{field} is not valid base64url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_parsing_is_canonical() {
        assert_eq!(parse_decimal("0"), Some(0));
        assert_eq!(parse_decimal("65536"), Some(65536));
        assert_eq!(parse_decimal("007"), None);
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal("+1"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("1.5"), None);
        assert_eq!(parse_decimal("99999999999999999999999"), None);
    }

    #[test]
    fn id_must_be_lowercase_alphanumeric() {
        assert!(check_id("argon2id").is_ok());
        assert!(check_id("Argon2id").is_err());
        assert!(check_id("argon-2").is_err());
        assert!(check_id("").is_err());
    }
}
