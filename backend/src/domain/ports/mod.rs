//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod profile_store;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    CreatedCredential, FixtureIdentityProvider, IdentityProvider, IdentityProviderError,
};
#[cfg(test)]
pub use profile_store::MockProfileStore;
pub use profile_store::{FixtureProfileStore, ProfileStore, ProfileStoreError};
