//! Runs against a real Postgres when `TEST_DATABASE_URL` is set; otherwise
//! every test returns early.

mod common;

use std::sync::Arc;

use serde_json::json;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use finboard_backend::{store::postgres::PgStore, AppState};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}

async fn seed_org_and_profile(pool: &PgPool) -> (Uuid, Uuid, String) {
    let org_id: Uuid =
        sqlx::query_scalar("INSERT INTO organizations (name) VALUES ($1) RETURNING id")
            .bind("Test Org")
            .fetch_one(pool)
            .await
            .unwrap();

    let identity_id = format!("user_pg_{}", Uuid::new_v4().simple());
    let profile_id: Uuid =
        sqlx::query_scalar("INSERT INTO profiles (identity_id, email) VALUES ($1, $2) RETURNING id")
            .bind(&identity_id)
            .bind("pg@test.local")
            .fetch_one(pool)
            .await
            .unwrap();

    (org_id, profile_id, identity_id)
}

async fn cleanup(pool: &PgPool, org_id: Uuid, profile_id: Uuid) {
    for table in ["transactions", "invoices", "payments", "projects", "meetings"] {
        sqlx::query(&format!("DELETE FROM {} WHERE organization_id = $1", table))
            .bind(org_id)
            .execute(pool)
            .await
            .unwrap();
    }
    sqlx::query("DELETE FROM organizations WHERE id = $1")
        .bind(org_id)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(profile_id)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn postgres_create_and_filtered_list() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (org, profile_id, user) = seed_org_and_profile(&pool).await;
    let addr = common::spawn_app(AppState::new(Arc::new(PgStore::new(pool.clone())))).await;

    let rows = [
        ("income", 120.50, "2024-01-15"),
        ("income", 80.0, "2024-01-31"),
        ("expense", 45.25, "2024-01-20"),
        ("income", 300.0, "2024-02-02"),
    ];
    for (kind, amount, date) in rows {
        let record = common::create_ok(
            addr,
            "/api/transactions",
            json!({
                "organizationId": org,
                "userId": user,
                "description": format!("{} on {}", kind, date),
                "amount": amount,
                "type": kind,
                "transaction_date": date,
            }),
        )
        .await;
        assert_eq!(record["created_by"], profile_id.to_string());
        assert_eq!(record["status"], "completed");
        assert_eq!(record["amount"], amount);
    }

    let (status, body) = common::get_json(
        addr,
        &format!(
            "/api/transactions?organizationId={}&type=income&startDate=2024-01-01&endDate=2024-01-31",
            org
        ),
    )
    .await;
    assert_eq!(status, 200);
    let found = common::records(&body);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|t| t["type"] == "income"));

    // Limit applies after the filters.
    let (_, body) = common::get_json(
        addr,
        &format!("/api/transactions?organizationId={}&type=income&limit=1", org),
    )
    .await;
    let found = common::records(&body);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["type"], "income");

    let invoice = common::create_ok(
        addr,
        "/api/invoices",
        json!({
            "organizationId": org,
            "userId": user,
            "invoice_number": "PG-1",
            "client_name": "Acme",
            "amount": 99.99,
        }),
    )
    .await;
    assert_eq!(invoice["status"], "draft");

    let (_, body) =
        common::get_json(addr, &format!("/api/invoices?organizationId={}&status=draft", org)).await;
    assert_eq!(common::records(&body).len(), 1);

    cleanup(&pool, org, profile_id).await;
}

#[tokio::test]
async fn postgres_unknown_user_is_404() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let addr = common::spawn_app(AppState::new(Arc::new(PgStore::new(pool)))).await;

    let (status, body) = common::post_json(
        addr,
        "/api/projects",
        &json!({ "organizationId": Uuid::new_v4(), "userId": "user_missing", "name": "Nope" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "User profile not found");
}

#[tokio::test]
async fn postgres_rejects_amounts_the_column_cannot_hold() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (org, profile_id, user) = seed_org_and_profile(&pool).await;
    let addr = common::spawn_app(AppState::new(Arc::new(PgStore::new(pool.clone())))).await;

    for amount in [json!(1e20), json!(0.001)] {
        let (status, _) = common::post_json(
            addr,
            "/api/payments",
            &json!({ "organizationId": org, "userId": user, "amount": amount }),
        )
        .await;
        assert_eq!(status, 400, "amount {} should be rejected", amount);
    }

    let payment = common::create_ok(
        addr,
        "/api/payments",
        json!({ "organizationId": org, "userId": user, "amount": "0.10" }),
    )
    .await;
    assert_eq!(payment["amount"], 0.1);

    cleanup(&pool, org, profile_id).await;
}
