use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::common::deserialize_optional_date,
    money::{to_cents, validate_amount},
    resource::{status_or_default, NewRecordContext, Resource},
    store::ResourceStore,
    AppState,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub budget: Option<Decimal>,
    pub status: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<Decimal>,
    pub status: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    pub budget: Option<Decimal>,
    #[validate(length(max = 32))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<Date>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<Date>,
}

impl Resource for Project {
    type Draft = CreateProjectRequest;
    type New = NewProject;

    const NAME: &'static str = "project";
    const DEFAULT_STATUS: &'static str = "active";

    fn store(state: &AppState) -> &dyn ResourceStore<Self> {
        state.projects.as_ref()
    }

    fn prepare(draft: CreateProjectRequest, ctx: NewRecordContext) -> NewProject {
        NewProject {
            organization_id: ctx.organization_id,
            created_by: ctx.created_by,
            name: draft.name,
            description: draft.description,
            budget: draft.budget.map(to_cents),
            status: status_or_default(draft.status, Self::DEFAULT_STATUS),
            start_date: draft.start_date.unwrap_or(ctx.today),
            end_date: draft.end_date,
        }
    }

    fn from_new(new: NewProject, id: Uuid, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            organization_id: new.organization_id,
            created_by: new.created_by,
            name: new.name,
            description: new.description,
            budget: new.budget,
            status: new.status,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn record_date(&self) -> Date {
        self.start_date
    }
}
