//! Tests for the registrar service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockIdentityProvider, MockProfileStore, ProfileStoreError};
use crate::domain::{ProviderUid, TimestampSpec};
use crate::logging::{BuildMode, ChannelPolicy, LogChannel, MemorySink, RedactionPolicy};

fn sample_details() -> RegistrationDetails {
    RegistrationDetails::try_from_parts("Field Officer", "fo@agency.gov", "hunter2")
        .expect("valid registration details")
}

fn sample_credentials() -> LoginCredentials {
    LoginCredentials::try_from_parts("fo@agency.gov", "hunter2").expect("valid credentials")
}

fn minted_credential() -> CreatedCredential {
    CreatedCredential {
        uid: ProviderUid::new("cred-1").expect("valid uid"),
        email: "fo@agency.gov".to_owned(),
    }
}

fn test_logger() -> (DiagnosticsLogger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = DiagnosticsLogger::new(
        ChannelPolicy::for_build_mode(BuildMode::Development),
        RedactionPolicy::default(),
        sink.clone(),
    );
    (logger, sink)
}

fn service(
    identity: MockIdentityProvider,
    profiles: MockProfileStore,
) -> (
    RegistrarService<MockIdentityProvider, MockProfileStore>,
    Arc<MemorySink>,
) {
    let (logger, sink) = test_logger();
    (
        RegistrarService::new(Arc::new(identity), Arc::new(profiles), logger),
        sink,
    )
}

#[tokio::test]
async fn register_writes_profile_after_credential() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_credential()
        .withf(|email, password| email == "fo@agency.gov" && password == "hunter2")
        .times(1)
        .return_once(|_, _| Ok(minted_credential()));
    identity.expect_delete_credential().times(0);

    let mut profiles = MockProfileStore::new();
    profiles
        .expect_insert()
        .withf(|collection, draft| {
            collection == PROFILE_COLLECTION
                && draft.uid.as_ref() == "cred-1"
                && draft.email == "fo@agency.gov"
                && draft.display_name == "Field Officer"
                && draft.created_at == TimestampSpec::ServerTime
                && draft.last_login_at == TimestampSpec::ServerTime
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let (registrar, _sink) = service(identity, profiles);
    let outcome = registrar.register(sample_details()).await;

    assert_eq!(outcome, OperationOutcome::Success);
}

#[tokio::test]
async fn register_surfaces_identity_rejection_without_touching_the_store() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_credential()
        .times(1)
        .return_once(|_, _| {
            Err(crate::domain::ports::IdentityProviderError::rejected(
                "email already in use",
            ))
        });

    let mut profiles = MockProfileStore::new();
    profiles.expect_insert().times(0);

    let (registrar, _sink) = service(identity, profiles);
    let outcome = registrar.register(sample_details()).await;

    assert!(!outcome.is_success());
    let message = outcome.message().expect("failure carries a message");
    assert!(message.contains("email already in use"));
}

#[tokio::test]
async fn register_rolls_back_the_credential_when_the_profile_write_fails() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_credential()
        .times(1)
        .return_once(|_, _| Ok(minted_credential()));
    identity
        .expect_delete_credential()
        .withf(|uid| uid.as_ref() == "cred-1")
        .times(1)
        .return_once(|_| Ok(()));

    let mut profiles = MockProfileStore::new();
    profiles
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(ProfileStoreError::write("quota exhausted")));

    let (registrar, _sink) = service(identity, profiles);
    let outcome = registrar.register(sample_details()).await;

    assert!(matches!(outcome, OperationOutcome::Failure { .. }));
    let message = outcome.message().expect("failure carries a message");
    assert!(message.contains("quota exhausted"));
}

#[tokio::test]
async fn register_reports_partial_failure_when_rollback_fails_too() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_credential()
        .times(1)
        .return_once(|_, _| Ok(minted_credential()));
    identity
        .expect_delete_credential()
        .times(1)
        .return_once(|_| {
            Err(crate::domain::ports::IdentityProviderError::unavailable(
                "connection reset",
            ))
        });

    let mut profiles = MockProfileStore::new();
    profiles
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(ProfileStoreError::write("quota exhausted")));

    let (registrar, _sink) = service(identity, profiles);
    let outcome = registrar.register(sample_details()).await;

    assert!(matches!(outcome, OperationOutcome::PartialFailure { .. }));
    let message = outcome.message().expect("partial failure carries a message");
    assert!(message.contains("cred-1"));
    assert!(message.contains("quota exhausted"));
    assert!(message.contains("connection reset"));
}

#[tokio::test]
async fn login_maps_verification_to_outcomes() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_verify_credential()
        .withf(|email, password| email == "fo@agency.gov" && password == "hunter2")
        .times(1)
        .return_once(|_, _| Ok(()));

    let (registrar, _sink) = service(identity, MockProfileStore::new());
    let outcome = registrar.login(sample_credentials()).await;

    assert_eq!(outcome, OperationOutcome::Success);
}

#[tokio::test]
async fn login_surfaces_rejection_messages_verbatim() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_verify_credential()
        .times(1)
        .return_once(|_, _| {
            Err(crate::domain::ports::IdentityProviderError::rejected(
                "invalid email or password",
            ))
        });

    let (registrar, sink) = service(identity, MockProfileStore::new());
    let outcome = registrar.login(sample_credentials()).await;

    assert!(!outcome.is_success());
    assert!(
        outcome
            .message()
            .expect("failure carries a message")
            .contains("invalid email or password")
    );
    assert_eq!(sink.lines_for(LogChannel::Warn).len(), 1);
}

#[tokio::test]
async fn failure_logs_never_carry_the_password() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_credential()
        .times(1)
        .return_once(|_, _| {
            Err(crate::domain::ports::IdentityProviderError::rejected(
                "weak password",
            ))
        });
    let mut profiles = MockProfileStore::new();
    profiles.expect_insert().times(0);

    let (registrar, sink) = service(identity, profiles);
    let _ = registrar.register(sample_details()).await;

    let lines = sink.lines_for(LogChannel::Warn);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("weak password"));
    assert!(!lines[0].contains("hunter2"));
}

#[tokio::test]
async fn rollback_logs_go_through_the_redacting_facade() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_credential()
        .times(1)
        .return_once(|_, _| Ok(minted_credential()));
    identity
        .expect_delete_credential()
        .times(1)
        .return_once(|_| Ok(()));

    let mut profiles = MockProfileStore::new();
    profiles
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(ProfileStoreError::write("quota exhausted")));

    let (registrar, sink) = service(identity, profiles);
    let _ = registrar.register(sample_details()).await;

    let lines = sink.lines_for(LogChannel::Warn);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("credential rolled back"));
    assert!(lines[0].contains("cred-1"));
}
