//! Async result plumbing and runtime requirements

use credhash::{AsyncCredentialResult, CredentialError, Credhash, Hashing};
use futures::executor::block_on;

fn fast_argon2() -> Box<dyn Hashing> {
    Box::new(
        Credhash::argon2id()
            .memory(64)
            .passes(1)
            .parallelism(1)
            .tag_length(8)
            .build()
            .expect("config should be valid"),
    )
}

#[test]
fn test_derivation_without_a_runtime_is_an_error() {
    let hasher = fast_argon2();

    assert!(matches!(
        block_on(hasher.hash("pw")),
        Err(CredentialError::Internal(_))
    ));
}

#[test]
fn test_rehash_check_needs_no_runtime() {
    let hasher = fast_argon2();
    let stored = "$argon2id$v=19$memory=64,passes=1,parallelism=1$c2FsdHNhbHQ$aGFzaGhhc2g";

    assert!(block_on(hasher.needs_rehash("")).expect("never fails"));
    assert!(!block_on(hasher.needs_rehash(stored)).expect("never fails"));
}

#[test]
fn test_malformed_verify_resolves_without_a_runtime() {
    let hasher = fast_argon2();
    assert!(!block_on(hasher.verify("pw", "halo")).expect("malformed is not an error"));
}

#[test]
fn test_ready_results() {
    assert_eq!(block_on(AsyncCredentialResult::ready(Ok(7u8))).ok(), Some(7));
    assert!(matches!(
        block_on(AsyncCredentialResult::<()>::error(CredentialError::internal("boom"))),
        Err(CredentialError::Internal(_))
    ));
}

#[tokio::test]
async fn test_dropped_result_does_not_disturb_later_calls() {
    let hasher = fast_argon2();
    drop(hasher.hash("abandoned"));

    let stored = hasher.hash("kept").await.expect("hash should succeed");
    assert!(hasher.verify("kept", &stored).await.expect("verify should succeed"));
}
