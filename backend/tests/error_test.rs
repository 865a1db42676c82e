mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use finboard_backend::{
    models::profile::Profile,
    resource::Resource,
    store::{ProfileStore, ResourceStore, StoreError, StoreResult},
    AppState,
};

/// Every resource operation fails the way an unreachable database would.
struct FailingStore;

#[async_trait]
impl<R: Resource> ResourceStore<R> for FailingStore {
    async fn fetch_all(&self, _organization_id: Uuid, _limit: Option<i64>) -> StoreResult<Vec<R>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn insert(&self, _record: R::New) -> StoreResult<R> {
        Err(StoreError::Unavailable("insert rejected by upstream".into()))
    }
}

#[async_trait]
impl ProfileStore for FailingStore {
    async fn find_by_identity(&self, identity_id: &str) -> StoreResult<Option<Profile>> {
        Ok(Some(Profile {
            id: Uuid::new_v4(),
            identity_id: identity_id.to_string(),
            email: None,
            full_name: None,
            created_at: OffsetDateTime::now_utc(),
        }))
    }

    async fn is_member(&self, _organization_id: Uuid, _profile_id: Uuid) -> StoreResult<bool> {
        Ok(true)
    }
}

/// Panics on reads to stand in for a bug deep in a collaborator.
struct PanickingStore;

#[async_trait]
impl<R: Resource> ResourceStore<R> for PanickingStore {
    async fn fetch_all(&self, _organization_id: Uuid, _limit: Option<i64>) -> StoreResult<Vec<R>> {
        panic!("row decoder exploded");
    }

    async fn insert(&self, _record: R::New) -> StoreResult<R> {
        panic!("row encoder exploded");
    }
}

#[async_trait]
impl ProfileStore for PanickingStore {
    async fn find_by_identity(&self, _identity_id: &str) -> StoreResult<Option<Profile>> {
        panic!("profile lookup exploded");
    }

    async fn is_member(&self, _organization_id: Uuid, _profile_id: Uuid) -> StoreResult<bool> {
        panic!("membership lookup exploded");
    }
}

#[tokio::test]
async fn store_errors_on_list_map_to_500_with_message() {
    let addr = common::spawn_app(AppState::new(Arc::new(FailingStore))).await;

    for resource in ["invoices", "meetings", "payments", "projects", "transactions"] {
        let (status, body) = common::get_json(
            addr,
            &format!("/api/{}?organizationId={}", resource, Uuid::new_v4()),
        )
        .await;
        assert_eq!(status, 500);
        assert_eq!(body["error"], "connection refused");
    }
}

#[tokio::test]
async fn store_errors_on_create_map_to_500_with_message() {
    let addr = common::spawn_app(AppState::new(Arc::new(FailingStore))).await;

    let (status, body) = common::post_json(
        addr,
        "/api/projects",
        &json!({ "organizationId": Uuid::new_v4(), "userId": "user_x", "name": "Doomed" }),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "insert rejected by upstream");
}

#[tokio::test]
async fn validation_runs_before_the_store_is_touched() {
    let addr = common::spawn_app(AppState::new(Arc::new(PanickingStore))).await;

    let (status, _) = common::get_json(addr, "/api/invoices").await;
    assert_eq!(status, 400);

    let (status, _) =
        common::post_json(addr, "/api/invoices", &json!({ "organizationId": Uuid::new_v4() })).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn panics_become_generic_500() {
    let addr = common::spawn_app(AppState::new(Arc::new(PanickingStore))).await;

    let (status, body) = common::get_json(
        addr,
        &format!("/api/transactions?organizationId={}", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Internal server error" }));

    let (status, body) = common::post_json(
        addr,
        "/api/meetings",
        &json!({ "organizationId": Uuid::new_v4(), "userId": "user_y", "title": "Boom" }),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal server error");

    // The server keeps serving after a panic.
    let (status, _) = common::get_json(addr, "/api/health").await;
    assert_eq!(status, 200);
}
