pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod money;
pub mod org_guard;
pub mod resource;
pub mod store;

use std::sync::Arc;

use models::{
    invoice::Invoice, meeting::Meeting, payment::Payment, project::Project,
    transaction::Transaction,
};
use store::{ProfileStore, ResourceStore};

/// Shared application state available to all handlers via axum's State extractor.
///
/// Each resource gets its own store handle so tests can swap a single
/// collaborator; in production all of them point at the same `PgStore`.
#[derive(Clone)]
pub struct AppState {
    pub invoices: Arc<dyn ResourceStore<Invoice>>,
    pub meetings: Arc<dyn ResourceStore<Meeting>>,
    pub payments: Arc<dyn ResourceStore<Payment>>,
    pub projects: Arc<dyn ResourceStore<Project>>,
    pub transactions: Arc<dyn ResourceStore<Transaction>>,
    pub profiles: Arc<dyn ProfileStore>,
    pub require_org_membership: bool,
}

impl AppState {
    /// Wires every collaborator to the same backing store.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: ResourceStore<Invoice>
            + ResourceStore<Meeting>
            + ResourceStore<Payment>
            + ResourceStore<Project>
            + ResourceStore<Transaction>
            + ProfileStore
            + 'static,
    {
        Self {
            invoices: store.clone(),
            meetings: store.clone(),
            payments: store.clone(),
            projects: store.clone(),
            transactions: store.clone(),
            profiles: store,
            require_org_membership: false,
        }
    }

    pub fn with_org_membership_check(mut self, enabled: bool) -> Self {
        self.require_org_membership = enabled;
        self
    }
}
