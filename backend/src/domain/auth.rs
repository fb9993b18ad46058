//! Authentication primitives shared by registration and sign-in.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the registrar.
//! Email format and password strength checks are deliberately absent: the
//! external identity platform owns those rules, and the registrar surfaces
//! its verdict verbatim.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Display name was missing or blank once trimmed.
    EmptyDisplayName,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated sign-in credentials accepted by the registrar.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("clerk@agency.gov", "hunter2").unwrap();
/// assert_eq!(creds.email(), "clerk@agency.gov");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string forwarded to the identity platform.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload: a display name plus sign-in credentials.
///
/// ## Invariants
/// - `display_name` is trimmed and must not be empty after trimming.
/// - Credential invariants are those of [`LoginCredentials`].
///
/// # Examples
/// ```
/// use backend::domain::RegistrationDetails;
///
/// let details =
///     RegistrationDetails::try_from_parts("Field Officer", "fo@agency.gov", "hunter2").unwrap();
/// assert_eq!(details.display_name(), "Field Officer");
/// assert_eq!(details.email(), "fo@agency.gov");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    display_name: String,
    credentials: LoginCredentials,
}

impl RegistrationDetails {
    /// Construct registration details from raw name/email/password inputs.
    pub fn try_from_parts(
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let normalized = display_name.trim();
        if normalized.is_empty() {
            return Err(CredentialValidationError::EmptyDisplayName);
        }

        Ok(Self {
            display_name: normalized.to_owned(),
            credentials: LoginCredentials::try_from_parts(email, password)?,
        })
    }

    /// Display name recorded on the profile document.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Email string forwarded to the identity platform.
    pub fn email(&self) -> &str {
        self.credentials.email()
    }

    /// Password string forwarded to the identity platform.
    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    /// Borrow the embedded sign-in credentials.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }
}
