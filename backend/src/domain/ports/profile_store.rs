//! Port abstraction over the external document store holding profiles.

use async_trait::async_trait;

use crate::domain::ProfileDraft;

use super::define_port_error;

define_port_error! {
    /// Failures raised by profile store adapters.
    pub enum ProfileStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "profile store connection failed: {message}",
        /// Document write failed during execution.
        Write { message: String } => "profile store write failed: {message}",
    }
}

/// Port for writing profile documents.
///
/// The store resolves [`TimestampSpec::ServerTime`] sentinels with its own
/// clock; every sentinel in one write resolves to the same instant.
///
/// [`TimestampSpec::ServerTime`]: crate::domain::TimestampSpec::ServerTime
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Write a profile document into `collection`, keyed by its uid.
    async fn insert(
        &self,
        collection: &str,
        draft: &ProfileDraft,
    ) -> Result<(), ProfileStoreError>;
}

/// Fixture implementation for tests that do not exercise profile writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileStore;

#[async_trait]
impl ProfileStore for FixtureProfileStore {
    async fn insert(
        &self,
        _collection: &str,
        _draft: &ProfileDraft,
    ) -> Result<(), ProfileStoreError> {
        Ok(())
    }
}
