//! In-memory profile store adapter.
//!
//! Stands in for the external document store in development and tests.
//! Server-timestamp sentinels resolve through the injected clock; every
//! sentinel in one write resolves to the same instant, which is what makes
//! `created_at == last_login_at` hold for freshly registered profiles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{ProfileStore, ProfileStoreError};
use crate::domain::{ProfileDraft, ProfileRecord, ProviderUid, TimestampSpec};

type Collection = HashMap<String, ProfileRecord>;

/// Collection/uid-keyed document map with clock-resolved server timestamps.
///
/// Writing an existing document replaces it, matching document-store set
/// semantics.
pub struct InMemoryProfileStore {
    clock: Arc<dyn Clock>,
    collections: Mutex<HashMap<String, Collection>>,
}

impl InMemoryProfileStore {
    /// Create an empty store resolving server timestamps with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a document by collection and uid.
    pub fn get(&self, collection: &str, uid: &ProviderUid) -> Option<ProfileRecord> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .and_then(|documents| documents.get(uid.as_ref()))
            .cloned()
    }

    /// Fetch the first document in `collection` recorded under `email`.
    pub fn find_by_email(&self, collection: &str, email: &str) -> Option<ProfileRecord> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .and_then(|documents| {
                documents
                    .values()
                    .find(|record| record.email == email)
                    .cloned()
            })
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map_or(0, Collection::len)
    }
}

fn resolve(stamp: TimestampSpec, now: DateTime<Utc>) -> DateTime<Utc> {
    match stamp {
        TimestampSpec::ServerTime => now,
        TimestampSpec::Fixed(at) => at,
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert(
        &self,
        collection: &str,
        draft: &ProfileDraft,
    ) -> Result<(), ProfileStoreError> {
        // One clock read per write: all sentinels share the instant.
        let now = self.clock.utc();
        let record = ProfileRecord {
            uid: draft.uid.clone(),
            email: draft.email.clone(),
            display_name: draft.display_name.clone(),
            created_at: resolve(draft.created_at, now),
            last_login_at: resolve(draft.last_login_at, now),
        };

        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection.to_owned())
            .or_default()
            .insert(draft.uid.as_ref().to_owned(), record);
        Ok(())
    }
}
