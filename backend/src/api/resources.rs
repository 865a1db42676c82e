//! Generic list/create endpoints, mounted once per resource kind.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use time::OffsetDateTime;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    filter::ListFilter,
    models::common::{DataEnvelope, ListParams, RequestOwner},
    org_guard,
    resource::{NewRecordContext, Resource},
    AppState,
};

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<DataEnvelope<Vec<R>>>> {
    let Query(params) = params?;
    let organization_id = params.organization_id()?;
    let filter = ListFilter::for_resource::<R>(&params)?;

    let records = R::store(&state).list(organization_id, &filter).await?;

    tracing::debug!(
        resource = R::NAME,
        %organization_id,
        count = records.len(),
        "Listed records"
    );
    Ok(Json(DataEnvelope::new(records)))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<R>>)> {
    let Json(body) = body?;
    let owner = RequestOwner::from_body(&body)?;

    let draft: R::Draft = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} payload: {}", R::NAME, e)))?;
    draft.validate()?;

    let profile = state
        .profiles
        .find_by_identity(&owner.identity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile not found".into()))?;

    if state.require_org_membership {
        org_guard::verify_membership(state.profiles.as_ref(), owner.organization_id, profile.id)
            .await?;
    }

    let ctx = NewRecordContext {
        organization_id: owner.organization_id,
        created_by: profile.id,
        today: OffsetDateTime::now_utc().date(),
    };
    let record = R::store(&state).insert(R::prepare(draft, ctx)).await?;

    tracing::info!(
        resource = R::NAME,
        id = %record.id(),
        organization_id = %owner.organization_id,
        created_by = %profile.id,
        "Created record"
    );
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(record))))
}
