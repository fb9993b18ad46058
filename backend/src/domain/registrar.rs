//! Credential and profile registration domain service.
//!
//! The registrar drives the two-step account write: create the credential
//! on the identity platform, then write the profile document keyed by the
//! issued identifier. A failed profile write triggers a compensating
//! credential delete, keeping the two systems consistent from the
//! caller's point of view. Only when the compensation itself fails does
//! the caller see a partial failure naming the stranded credential.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    CreatedCredential, IdentityProvider, ProfileStore, ProfileStoreError,
};
use crate::domain::{
    LoginCredentials, OperationOutcome, PROFILE_COLLECTION, ProfileDraft, RegistrationDetails,
};
use crate::logging::DiagnosticsLogger;

/// Driving port for account registration and sign-in.
///
/// Both operations are single-shot request/response calls: no retries, no
/// timeouts, no intermediate state observable to callers. Every failure
/// mode folds into [`OperationOutcome`]; nothing is raised.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Create a credential and its profile document.
    async fn register(&self, details: RegistrationDetails) -> OperationOutcome;

    /// Verify a credential; session issuance stays with the identity
    /// platform and no profile document is touched.
    async fn login(&self, credentials: LoginCredentials) -> OperationOutcome;
}

/// Registrar service orchestrating the identity and profile-store ports.
pub struct RegistrarService<I, S> {
    identity: Arc<I>,
    profiles: Arc<S>,
    logger: DiagnosticsLogger,
}

impl<I, S> Clone for RegistrarService<I, S> {
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
            profiles: Arc::clone(&self.profiles),
            logger: self.logger.clone(),
        }
    }
}

impl<I, S> RegistrarService<I, S> {
    /// Create a new registrar over the identity and profile-store ports.
    pub fn new(identity: Arc<I>, profiles: Arc<S>, logger: DiagnosticsLogger) -> Self {
        Self {
            identity,
            profiles,
            logger,
        }
    }
}

impl<I, S> RegistrarService<I, S>
where
    I: IdentityProvider,
    S: ProfileStore,
{
    async fn compensate_credential(
        &self,
        created: &CreatedCredential,
        write_error: &ProfileStoreError,
    ) -> OperationOutcome {
        match self.identity.delete_credential(&created.uid).await {
            Ok(()) => {
                self.logger.warn_payload(
                    "profile write failed; credential rolled back",
                    &json!({"uid": created.uid.as_ref(), "reason": write_error.to_string()}),
                );
                OperationOutcome::failure(write_error.to_string())
            }
            Err(delete_error) => {
                self.logger.error_payload(
                    "profile write failed and credential rollback failed",
                    &json!({
                        "uid": created.uid.as_ref(),
                        "writeError": write_error.to_string(),
                        "deleteError": delete_error.to_string(),
                    }),
                );
                OperationOutcome::partial_failure(format!(
                    "{write_error}; credential {uid} exists without a profile and could not \
                     be removed: {delete_error}",
                    uid = created.uid
                ))
            }
        }
    }
}

#[async_trait]
impl<I, S> Registrar for RegistrarService<I, S>
where
    I: IdentityProvider,
    S: ProfileStore,
{
    async fn register(&self, details: RegistrationDetails) -> OperationOutcome {
        let created = match self
            .identity
            .create_credential(details.email(), details.password())
            .await
        {
            Ok(created) => created,
            Err(error) => {
                self.logger.warn_payload(
                    "credential creation rejected",
                    &json!({"email": details.email(), "reason": error.to_string()}),
                );
                return OperationOutcome::failure(error.to_string());
            }
        };

        let draft = ProfileDraft::registration(
            created.uid.clone(),
            created.email.clone(),
            details.display_name(),
        );
        match self.profiles.insert(PROFILE_COLLECTION, &draft).await {
            Ok(()) => {
                self.logger.log("account registered");
                OperationOutcome::Success
            }
            Err(write_error) => self.compensate_credential(&created, &write_error).await,
        }
    }

    async fn login(&self, credentials: LoginCredentials) -> OperationOutcome {
        match self
            .identity
            .verify_credential(credentials.email(), credentials.password())
            .await
        {
            Ok(()) => OperationOutcome::Success,
            Err(error) => {
                self.logger.warn_payload(
                    "sign-in rejected",
                    &json!({"email": credentials.email(), "reason": error.to_string()}),
                );
                OperationOutcome::failure(error.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "registrar_tests.rs"]
mod tests;
