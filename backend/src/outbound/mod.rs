//! Outbound adapters implementing the domain ports.
//!
//! The managed identity platform and the hosted document store are not
//! reimplemented here; these in-process adapters stand in for them in
//! development and tests.

mod identity;
mod persistence;

pub use identity::InMemoryIdentityProvider;
pub use persistence::InMemoryProfileStore;
