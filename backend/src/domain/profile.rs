//! Profile record types written to the external document store.
//!
//! Profiles are application-owned documents keyed by the identity
//! platform's credential identifier. They are created exactly once, at
//! registration time, and sign-in never rewrites them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection that holds the profile documents.
pub const PROFILE_COLLECTION: &str = "users";

/// Validation errors returned by [`ProviderUid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// Identifier was empty.
    EmptyUid,
    /// Identifier carried surrounding whitespace.
    PaddedUid,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUid => write!(f, "provider uid must not be empty"),
            Self::PaddedUid => write!(f, "provider uid must not carry surrounding whitespace"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Opaque credential identifier issued by the identity platform.
///
/// The platform owns the identifier format, so validation is limited to
/// shape: non-empty, no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderUid(String);

impl ProviderUid {
    /// Validate and construct a [`ProviderUid`] from borrowed input.
    pub fn new(uid: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        Self::from_owned(uid.as_ref().to_owned())
    }

    /// Generate a fresh random identifier, for adapters that mint their own.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(uid: String) -> Result<Self, ProfileValidationError> {
        if uid.is_empty() {
            return Err(ProfileValidationError::EmptyUid);
        }
        if uid.trim() != uid {
            return Err(ProfileValidationError::PaddedUid);
        }
        Ok(Self(uid))
    }
}

impl AsRef<str> for ProviderUid {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProviderUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProviderUid> for String {
    fn from(value: ProviderUid) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProviderUid {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Timestamp submitted with a document write.
///
/// `ServerTime` is the sentinel the document store resolves on its side;
/// every sentinel in one write resolves to the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSpec {
    /// Resolve to the store's clock at write time.
    ServerTime,
    /// Use the supplied instant as-is.
    Fixed(DateTime<Utc>),
}

/// Profile document submitted to the store at registration time.
///
/// ## Invariants
/// - A draft is only built after the identity platform issued `uid`, which
///   preserves the credential-before-profile write ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    /// Credential identifier the document is keyed by.
    pub uid: ProviderUid,
    /// Email echoed back by the identity platform.
    pub email: String,
    /// Display name supplied by the registrant.
    pub display_name: String,
    /// Creation instant; `ServerTime` on registration.
    pub created_at: TimestampSpec,
    /// Last sign-in instant; `ServerTime` on registration.
    pub last_login_at: TimestampSpec,
}

impl ProfileDraft {
    /// Build the registration-time draft: both timestamps are server-assigned
    /// in the same write, so they resolve to the same instant.
    pub fn registration(
        uid: ProviderUid,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name: display_name.into(),
            created_at: TimestampSpec::ServerTime,
            last_login_at: TimestampSpec::ServerTime,
        }
    }
}

/// Stored profile document with resolved timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Credential identifier the document is keyed by.
    pub uid: ProviderUid,
    /// Email recorded at registration.
    pub email: String,
    /// Display name recorded at registration.
    pub display_name: String,
    /// Server-assigned creation instant.
    pub created_at: DateTime<Utc>,
    /// Server-assigned last sign-in instant; equals `created_at` until a
    /// sign-in update ships (none is defined today).
    pub last_login_at: DateTime<Utc>,
}
