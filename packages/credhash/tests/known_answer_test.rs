//! Published test vectors and cross-checks against the primitives

use ::argon2::{Algorithm as Variant, Argon2, Params, Version};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use credhash::params::argon2::{VERSION_0X10, VERSION_0X13};
use credhash::{Argon2Params, Credential, Credhash, RehashReason};
use hex_literal::hex;

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

#[tokio::test]
async fn test_scrypt_rfc7914_vector() {
    // RFC 7914 section 12, third vector
    let expected = hex!(
        "7023bdcb3afd7348461c06cd81fd38eb fda8fbba904f8e3ea9b543f6545da1f2"
        "d5432955613f0fcf62d49705242a9af9 e61e85dc0d651e40dfcf017b45575887"
    );
    let stored = format!(
        "$scrypt$cost=16384,blocksize=8,parallelization=1${}${}",
        b64(b"SodiumChloride"),
        b64(&expected)
    );

    let hasher = Credhash::scrypt()
        .cost(16384)
        .block_size(8)
        .parallelization(1)
        .key_length(64)
        .build()
        .expect("config should be valid");

    assert!(hasher.verify("pleaseletmein", &stored).await.expect("verify should succeed"));
    assert!(!hasher.verify("pleaseletmeout", &stored).await.expect("verify should succeed"));
    assert!(!hasher.needs_rehash(&stored).await.expect("never fails"));
}

#[tokio::test]
async fn test_argon2id_reference_vector() {
    // Reference implementation: t=2, m=2^16, p=1, "password" / "somesalt"
    let expected = hex!("09316115d5cf24ed5a15a31a3ba326e5cf32edc24702987c02b6566f61913cf7");
    let stored = format!(
        "$argon2id$v=19$memory=65536,passes=2,parallelism=1${}${}",
        b64(b"somesalt"),
        b64(&expected)
    );
    assert!(stored.ends_with("$c29tZXNhbHQ$CTFhFdXPJO1aFaMaO6Mm5c8y7cJHAph8ArZWb2GRPPc"));

    let hasher = Credhash::argon2id()
        .memory(65536)
        .passes(2)
        .parallelism(1)
        .tag_length(32)
        .build()
        .expect("config should be valid");

    assert!(hasher.verify("password", &stored).await.expect("verify should succeed"));
    assert!(!hasher.verify("Password", &stored).await.expect("verify should succeed"));
}

#[tokio::test]
async fn test_argon2id_output_matches_the_primitive() {
    let hasher = Credhash::argon2id()
        .memory(256)
        .passes(2)
        .parallelism(2)
        .tag_length(24)
        .build()
        .expect("config should be valid");
    let stored = hasher.hash("cross-check").await.expect("hash should succeed");
    let credential = Credential::<Argon2Params>::deserialize(&stored).expect("should decode");

    let params = Params::new(256, 2, 2, Some(24)).expect("valid params");
    let mut key = [0u8; 24];
    Argon2::new(Variant::Argon2id, Version::V0x13, params)
        .hash_password_into(b"cross-check", credential.salt(), &mut key)
        .expect("derivation should succeed");

    assert_eq!(credential.hash(), key);
}

#[tokio::test]
async fn test_legacy_versionless_argon2_credential() {
    let salt = b"legacy-salt-0001";
    let params = Params::new(256, 1, 1, Some(32)).expect("valid params");
    let mut key = [0u8; 32];
    Argon2::new(Variant::Argon2id, Version::V0x10, params)
        .hash_password_into(b"old password", salt, &mut key)
        .expect("derivation should succeed");
    let stored = format!(
        "$argon2id$memory=256,passes=1,parallelism=1${}${}",
        b64(salt),
        b64(&key)
    );

    let hasher = Credhash::argon2id()
        .memory(256)
        .passes(1)
        .parallelism(1)
        .tag_length(32)
        .build()
        .expect("config should be valid");

    assert!(hasher.verify("old password", &stored).await.expect("verify should succeed"));
    assert!(!hasher.verify("new password", &stored).await.expect("verify should succeed"));
    assert!(hasher.needs_rehash(&stored).await.expect("never fails"));
    assert_eq!(
        hasher.rehash_reasons(&stored).expect("should decode"),
        vec![RehashReason::Version {
            stored: Some(VERSION_0X10),
            current: Some(VERSION_0X13),
        }]
    );

    // The explicit v=16 spelling decodes to the same credential
    let explicit = stored.replacen("$argon2id$", "$argon2id$v=16$", 1);
    assert!(hasher.verify("old password", &explicit).await.expect("verify should succeed"));
}
