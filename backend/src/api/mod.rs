pub mod analytics;
pub mod resources;

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{
    models::{
        invoice::Invoice, meeting::Meeting, payment::Payment, project::Project,
        transaction::Transaction,
    },
    AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        // Analytics
        .route("/api/analytics/summary", get(analytics::summary))
        // Resources
        .route(
            "/api/invoices",
            get(resources::list::<Invoice>).post(resources::create::<Invoice>),
        )
        .route(
            "/api/meetings",
            get(resources::list::<Meeting>).post(resources::create::<Meeting>),
        )
        .route(
            "/api/payments",
            get(resources::list::<Payment>).post(resources::create::<Payment>),
        )
        .route(
            "/api/projects",
            get(resources::list::<Project>).post(resources::create::<Project>),
        )
        .route(
            "/api/transactions",
            get(resources::list::<Transaction>).post(resources::create::<Transaction>),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
