//! Server-side core of the livelihood-programme inventory dashboard.
//!
//! Two units make up the crate: the credential-and-profile registrar
//! (domain service over identity and document-store ports) and the
//! redacting diagnostics logger every server-side code path uses instead
//! of raw output. Request handling, routing, and presentation live in the
//! dashboard application that consumes this crate.

pub mod domain;
pub mod logging;
pub mod outbound;

/// Redacting logger façade threaded to components at construction time.
pub use logging::DiagnosticsLogger;
