//! In-memory identity provider adapter.
//!
//! Stands in for the managed identity platform in development and tests.
//! It enforces the platform-side rules the registrar deliberately does not
//! check locally: email shape, minimum password length, and email
//! uniqueness. Failure messages mirror the hosted platform's wording
//! because callers surface them verbatim.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ProviderUid;
use crate::domain::ports::{CreatedCredential, IdentityProvider, IdentityProviderError};

const MIN_PASSWORD_CHARS: usize = 6;

struct StoredCredential {
    uid: ProviderUid,
    password: Zeroizing<String>,
}

/// Email-keyed credential map with platform-style validation.
///
/// Concurrent creations for the same email race against the mutex; at most
/// one wins and the rest receive the duplicate-email rejection.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    credentials: Mutex<HashMap<String, StoredCredential>>,
}

impl InMemoryIdentityProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of credentials currently held.
    pub fn credential_count(&self) -> usize {
        self.credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CreatedCredential, IdentityProviderError> {
        if !email.contains('@') {
            return Err(IdentityProviderError::rejected(
                "the email address is badly formatted",
            ));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(IdentityProviderError::rejected(format!(
                "the password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        let mut credentials = self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if credentials.contains_key(email) {
            return Err(IdentityProviderError::rejected(
                "the email address is already in use",
            ));
        }

        let uid = ProviderUid::random();
        credentials.insert(
            email.to_owned(),
            StoredCredential {
                uid: uid.clone(),
                password: Zeroizing::new(password.to_owned()),
            },
        );
        Ok(CreatedCredential {
            uid,
            email: email.to_owned(),
        })
    }

    async fn verify_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityProviderError> {
        let credentials = self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match credentials.get(email) {
            Some(stored) if stored.password.as_str() == password => Ok(()),
            _ => Err(IdentityProviderError::rejected("invalid email or password")),
        }
    }

    async fn delete_credential(&self, uid: &ProviderUid) -> Result<(), IdentityProviderError> {
        let mut credentials = self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Deleting an absent credential is a no-op.
        credentials.retain(|_, stored| stored.uid != *uid);
        Ok(())
    }
}
