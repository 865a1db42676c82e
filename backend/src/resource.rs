//! The shape shared by every organization-scoped resource (invoices, meetings,
//! payments, projects, transactions).
//!
//! The generic list/create handlers in [`crate::api::resources`] and both store
//! implementations are written once against this trait; each model module
//! supplies the resource-specific pieces: its create payload, its default
//! status, which date field range filters compare against, and whether it
//! carries a `type` discriminator.

use serde::{de::DeserializeOwned, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::{store::ResourceStore, AppState};

/// Values the server merges into every new record. Never taken from the
/// request body.
#[derive(Debug, Clone, Copy)]
pub struct NewRecordContext {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub today: Date,
}

pub trait Resource: Serialize + Clone + Send + Sync + Unpin + 'static {
    /// Caller-supplied fields accepted by `POST /api/<resource>`.
    type Draft: DeserializeOwned + Validate + Send + 'static;
    /// A fully defaulted record ready for insertion (no id, no timestamp).
    type New: Send + 'static;

    /// Singular name used in logs and error messages.
    const NAME: &'static str;
    const DEFAULT_STATUS: &'static str;
    /// Whether `type=` narrows list results.
    const HAS_TYPE: bool = false;
    /// Whether `limit=` bounds list results.
    const SUPPORTS_LIMIT: bool = false;

    fn store(state: &AppState) -> &dyn ResourceStore<Self>;

    fn prepare(draft: Self::Draft, ctx: NewRecordContext) -> Self::New;

    /// Materializes a stored record from an insert, for stores that assign
    /// ids and timestamps themselves.
    fn from_new(new: Self::New, id: Uuid, created_at: OffsetDateTime) -> Self;

    fn id(&self) -> Uuid;
    fn organization_id(&self) -> Uuid;
    fn status(&self) -> &str;
    /// The date range filters compare against (issue date, payment date, ...).
    fn record_date(&self) -> Date;

    fn kind(&self) -> Option<&str> {
        None
    }
}

/// Returns the caller's status, or `default` when it is absent or blank.
pub fn status_or_default(status: Option<String>, default: &str) -> String {
    match status {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => default.to_string(),
    }
}
