//! Hasher configuration: options, builders and construction-time validation

use credhash::{
    Argon2Hasher, Argon2Options, Argon2Params, CredentialError, Credhash, ScryptHasher,
    ScryptOptions, ScryptParams,
};

fn is_configuration_error<T>(result: credhash::Result<T>) -> bool {
    matches!(result, Err(CredentialError::Configuration(_)))
}

#[test]
fn test_recommended_argon2id() {
    let hasher = Argon2Hasher::recommended().expect("recommended options are valid");
    let config = hasher.config();

    assert_eq!(*config.params(), Argon2Params::new(65536, 3, 4));
    assert_eq!(config.tag_length(), 32);
    assert_eq!(config.salt_length(), 16);
    assert_eq!(Argon2Options::default(), Argon2Options::RECOMMENDED);
}

#[test]
fn test_recommended_scrypt() {
    let hasher = ScryptHasher::recommended().expect("recommended options are valid");
    let config = hasher.config();

    assert_eq!(*config.params(), ScryptParams::new(1 << 17, 8, 1));
    assert_eq!(config.tag_length(), 64);
    assert_eq!(config.salt_length(), 16);
}

#[test]
fn test_argon2id_bounds_at_construction() {
    let minimal = || Credhash::argon2id().memory(8).passes(1).parallelism(1);

    assert!(minimal().build().is_ok());
    assert!(is_configuration_error(minimal().memory(7).build()));
    assert!(is_configuration_error(minimal().parallelism(0).build()));
    assert!(is_configuration_error(minimal().passes(0).build()));
    assert!(is_configuration_error(minimal().tag_length(3).build()));
    assert!(minimal().tag_length(4).build().is_ok());
    // 8 KiB per lane
    assert!(is_configuration_error(minimal().parallelism(2).build()));
    assert!(minimal().memory(16).parallelism(2).build().is_ok());
}

#[test]
fn test_scrypt_bounds_at_construction() {
    let minimal = || Credhash::scrypt().cost(2).block_size(1).parallelization(1);

    assert!(minimal().build().is_ok());
    assert!(is_configuration_error(minimal().cost(1).build()));
    assert!(is_configuration_error(minimal().cost(1000).build()));
    assert!(is_configuration_error(minimal().block_size(0).build()));
    assert!(is_configuration_error(minimal().parallelization(0).build()));
    assert!(is_configuration_error(
        minimal().block_size(8).parallelization(134_217_728).build()
    ));
    assert!(is_configuration_error(minimal().key_length(63).build()));
    assert!(is_configuration_error(minimal().key_length(129).build()));
    assert!(minimal().key_length(128).build().is_ok());
}

#[test]
fn test_salt_length_bounds() {
    for bad in [0usize, 7, 1025] {
        assert!(is_configuration_error(Credhash::argon2id().salt_length(bad).build()));
        assert!(is_configuration_error(Credhash::scrypt().salt_length(bad).build()));
    }
    for good in [8usize, 1024] {
        assert!(Credhash::argon2id().salt_length(good).build().is_ok());
        assert!(Credhash::scrypt().salt_length(good).build().is_ok());
    }
}

#[test]
fn test_options_deserialize_with_defaults() {
    let empty: Argon2Options = serde_json::from_str("{}").expect("all fields default");
    assert_eq!(empty, Argon2Options::RECOMMENDED);

    let partial: Argon2Options =
        serde_json::from_str(r#"{"passes": 2, "parallelism": 1}"#).expect("valid json");
    assert_eq!(partial.memory, 65536);
    assert_eq!(partial.passes, 2);
    assert_eq!(partial.parallelism, 1);
    assert_eq!(partial.tag_length, 32);

    let scrypt: ScryptOptions =
        serde_json::from_str(r#"{"cost": 16384}"#).expect("valid json");
    assert_eq!(
        scrypt,
        ScryptOptions {
            cost: 16384,
            ..ScryptOptions::RECOMMENDED
        }
    );

    let round_trip: ScryptOptions =
        serde_json::from_str(&serde_json::to_string(&scrypt).expect("serializable"))
            .expect("valid json");
    assert_eq!(round_trip, scrypt);
}

#[test]
fn test_options_from_config_are_validated() {
    let options: Argon2Options =
        serde_json::from_str(r#"{"memory": 4, "parallelism": 1}"#).expect("valid json");
    assert!(is_configuration_error(Argon2Hasher::with_options(options)));

    let options: ScryptOptions =
        serde_json::from_str(r#"{"cost": 1024, "key_length": 32}"#).expect("valid json");
    assert!(is_configuration_error(ScryptHasher::with_options(options)));
}

#[test]
fn test_scrypt_primitive_limits_at_construction() {
    // Accepted by the schema, but 128·r·(N + p) exceeds 2·128·r·N
    assert!(is_configuration_error(
        Credhash::scrypt().cost(2).block_size(1).parallelization(3).build()
    ));
    // scrypt requires log2(N) < 16·r
    assert!(is_configuration_error(
        Credhash::scrypt().cost(1 << 16).block_size(1).parallelization(1).build()
    ));
    assert!(Credhash::scrypt()
        .cost(1 << 15)
        .block_size(1)
        .parallelization(1)
        .build()
        .is_ok());
}

#[tokio::test]
async fn test_scrypt_credentials_beyond_primitive_limits_do_not_verify() {
    let hasher = Credhash::scrypt()
        .cost(16)
        .block_size(8)
        .parallelization(1)
        .build()
        .expect("config should be valid");
    let hash = "A".repeat(86);

    for params in [
        "cost=2,blocksize=1,parallelization=3",
        "cost=65536,blocksize=1,parallelization=1",
    ] {
        let stored = format!("$scrypt${params}$c2FsdHNhbHQ${hash}");
        assert!(
            !hasher.verify("pw", &stored).await.expect("not an environment failure"),
            "{params} should not verify"
        );
        assert!(matches!(
            hasher.verify_strict("pw", &stored).await,
            Err(CredentialError::Validation(_))
        ));
        // No key is derived for rehash checks
        assert!(hasher.needs_rehash(&stored).await.expect("never fails"));
    }
}

#[tokio::test]
async fn test_argon2_memory_reservation_failure_propagates() {
    let hasher = Credhash::argon2id()
        .memory(256)
        .passes(1)
        .parallelism(1)
        .build()
        .expect("config should be valid");
    // Roughly 4 TiB of working memory
    let stored = "$argon2id$v=19$memory=4294967295,passes=1,parallelism=1$c2FsdHNhbHQ$aGFzaGhhc2g";

    assert!(matches!(
        hasher.verify("pw", stored).await,
        Err(CredentialError::ResourceExhausted(_))
    ));
}

#[test]
fn test_debug_output_names_the_algorithm() {
    let hasher = Credhash::scrypt().build().expect("recommended options are valid");
    assert!(format!("{hasher:?}").contains("Scrypt"));
}
