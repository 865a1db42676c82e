use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::common::deserialize_optional_date,
    resource::{status_or_default, NewRecordContext, Resource},
    store::ResourceStore,
    AppState,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Meeting {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub meeting_date: Date,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub meeting_date: Date,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMeetingRequest {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub meeting_date: Option<Date>,
    #[validate(range(min = 1, max = 1440, message = "duration_minutes must be between 1 and 1440"))]
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    #[validate(length(max = 32))]
    pub status: Option<String>,
}

impl Resource for Meeting {
    type Draft = CreateMeetingRequest;
    type New = NewMeeting;

    const NAME: &'static str = "meeting";
    const DEFAULT_STATUS: &'static str = "scheduled";

    fn store(state: &AppState) -> &dyn ResourceStore<Self> {
        state.meetings.as_ref()
    }

    fn prepare(draft: CreateMeetingRequest, ctx: NewRecordContext) -> NewMeeting {
        NewMeeting {
            organization_id: ctx.organization_id,
            created_by: ctx.created_by,
            title: draft.title,
            description: draft.description,
            meeting_date: draft.meeting_date.unwrap_or(ctx.today),
            duration_minutes: draft.duration_minutes,
            location: draft.location,
            status: status_or_default(draft.status, Self::DEFAULT_STATUS),
        }
    }

    fn from_new(new: NewMeeting, id: Uuid, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            organization_id: new.organization_id,
            created_by: new.created_by,
            title: new.title,
            description: new.description,
            meeting_date: new.meeting_date,
            duration_minutes: new.duration_minutes,
            location: new.location,
            status: new.status,
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
        self.meeting_date
    }
}
