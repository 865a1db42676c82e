#![allow(dead_code)]
use std::{net::SocketAddr, sync::Arc};

use serde_json::Value;
use uuid::Uuid;

use finboard_backend::{api, models::profile::Profile, store::memory::MemoryStore, AppState};

/// Spin up a real Axum server on a random port for the given state.
pub async fn spawn_app(state: AppState) -> SocketAddr {
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Server over a fresh in-memory store. The store handle is returned so tests
/// can register profiles and memberships directly.
pub async fn setup_test_app() -> (SocketAddr, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let addr = spawn_app(AppState::new(store.clone())).await;
    (addr, store)
}

/// Register a profile under a unique identity-provider id. Returns (identity_id, profile).
pub async fn create_test_profile(store: &MemoryStore, prefix: &str) -> (String, Profile) {
    let identity_id = format!("user_{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..8]);
    let email = format!("{}@test.local", prefix);
    let profile = store.add_profile(&identity_id, Some(email.as_str())).await;
    (identity_id, profile)
}

/// Build a reqwest client (reusable across requests in a test).
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// GET `path` (including any query string); returns (status, JSON body).
pub async fn get_json(addr: SocketAddr, path: &str) -> (u16, Value) {
    let resp = http_client()
        .get(format!("http://{}{}", addr, path))
        .send()
        .await
        .expect("GET request failed");
    let status = resp.status().as_u16();
    let body = resp.json().await.expect("Response body should be JSON");
    (status, body)
}

/// POST a JSON body to `path`; returns (status, JSON body).
pub async fn post_json(addr: SocketAddr, path: &str, body: &Value) -> (u16, Value) {
    let resp = http_client()
        .post(format!("http://{}{}", addr, path))
        .json(body)
        .send()
        .await
        .expect("POST request failed");
    let status = resp.status().as_u16();
    let body = resp.json().await.expect("Response body should be JSON");
    (status, body)
}

/// POST that must succeed; returns the created record.
pub async fn create_ok(addr: SocketAddr, path: &str, body: Value) -> Value {
    let (status, body) = post_json(addr, path, &body).await;
    assert_eq!(status, 201, "create on {} failed: {}", path, body);
    body["data"].clone()
}

/// Records from a `{ "data": [...] }` list response.
pub fn records(body: &Value) -> Vec<Value> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .clone()
}
