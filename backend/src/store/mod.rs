//! Data-access interface.
//!
//! Handlers never talk to a database directly: they go through these traits,
//! which `AppState` holds as trait objects. [`postgres::PgStore`] is the
//! production implementation; [`memory::MemoryStore`] backs local runs and
//! the integration tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{filter::ListFilter, models::profile::Profile, resource::Resource};

/// A failure reported by the data-access layer. The message is returned to
/// the caller verbatim.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// Every record of the organization, newest first, optionally capped.
    async fn fetch_all(&self, organization_id: Uuid, limit: Option<i64>) -> StoreResult<Vec<R>>;

    /// Records of the organization matching `filter`. The default bulk-fetches
    /// and filters in memory; stores that can push predicates into their
    /// query should override it.
    ///
    /// `limit` counts matching records, so the fetch itself is only capped
    /// when there is nothing to filter.
    async fn list(&self, organization_id: Uuid, filter: &ListFilter) -> StoreResult<Vec<R>> {
        if !filter.has_predicates() {
            return self.fetch_all(organization_id, filter.limit).await;
        }
        let records = self.fetch_all(organization_id, None).await?;
        Ok(filter.apply(records))
    }

    /// Persists a new record; the store assigns `id` and `created_at`.
    async fn insert(&self, record: R::New) -> StoreResult<R>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_identity(&self, identity_id: &str) -> StoreResult<Option<Profile>>;

    async fn is_member(&self, organization_id: Uuid, profile_id: Uuid) -> StoreResult<bool>;
}
