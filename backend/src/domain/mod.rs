//! Domain primitives and the registration/sign-in core.
//!
//! Purpose: define strongly typed domain entities and the registrar
//! driving port consumed by request handlers. Keep types immutable and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - [`RegistrationDetails`] / [`LoginCredentials`] — validated inbound payloads.
//! - [`OperationOutcome`] — the success/failure sum type every registrar
//!   operation resolves to.
//! - [`ProfileRecord`] and friends — the document written at registration.
//! - [`Registrar`] / [`RegistrarService`] — the driving port and its
//!   implementation over the identity and profile-store ports.

pub mod auth;
pub mod outcome;
pub mod ports;
pub mod profile;
pub mod registrar;

pub use self::auth::{CredentialValidationError, LoginCredentials, RegistrationDetails};
pub use self::outcome::OperationOutcome;
pub use self::profile::{
    PROFILE_COLLECTION, ProfileDraft, ProfileRecord, ProfileValidationError, ProviderUid,
    TimestampSpec,
};
pub use self::registrar::{Registrar, RegistrarService};
