//! Port abstraction over the managed identity platform.
//!
//! The platform owns credential lifecycle, email format rules, and
//! password policy; this boundary only requests creation, verification,
//! and the compensating delete the registration saga relies on.

use async_trait::async_trait;

use crate::domain::ProviderUid;

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by identity-platform adapters.
    pub enum IdentityProviderError {
        /// The platform rejected the request: duplicate email, malformed
        /// email, weak password, or mismatched credentials.
        Rejected { message: String } => "identity provider rejected the request: {message}",
        /// The platform could not be reached or failed internally.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Credential issued by the platform on successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCredential {
    /// Platform-issued identifier for the new credential.
    pub uid: ProviderUid,
    /// Email as recorded by the platform.
    pub email: String,
}

/// Port for credential creation, verification, and compensation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a credential for `(email, password)` and return its identifier.
    async fn create_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CreatedCredential, IdentityProviderError>;

    /// Verify that `(email, password)` matches an existing credential.
    async fn verify_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityProviderError>;

    /// Delete a credential; used to compensate a failed profile write.
    async fn delete_credential(&self, uid: &ProviderUid) -> Result<(), IdentityProviderError>;
}

/// Fixture implementation for tests that do not exercise identity flows.
///
/// Every creation mints a fresh identifier, verification accepts the
/// development pair `fixture@agency.gov` / `password`, and deletion is a
/// no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn create_credential(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<CreatedCredential, IdentityProviderError> {
        Ok(CreatedCredential {
            uid: ProviderUid::random(),
            email: email.to_owned(),
        })
    }

    async fn verify_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityProviderError> {
        if email == "fixture@agency.gov" && password == "password" {
            Ok(())
        } else {
            Err(IdentityProviderError::rejected("invalid email or password"))
        }
    }

    async fn delete_credential(&self, _uid: &ProviderUid) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}
