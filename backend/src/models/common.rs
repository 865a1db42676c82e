use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::Date;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    filter::parse_iso_date,
};

/// Response envelope: every success body is `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Query params shared by the resource list endpoints.
///
/// Everything arrives as a string so malformed values surface as a JSON
/// `400` from our own validation rather than an extractor rejection.
/// `limit` is clamped to 1..=500.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(alias = "organization_id")]
    pub organization_id: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn organization_id(&self) -> Result<Uuid> {
        match self.organization_id.as_deref().map(str::trim) {
            None | Some("") => Err(AppError::BadRequest("Organization ID is required".into())),
            Some(raw) => parse_organization_id(raw),
        }
    }

    pub fn limit(&self) -> Result<Option<i64>> {
        match self.limit.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(|n| Some(n.clamp(1, 500)))
                .map_err(|_| AppError::BadRequest("limit must be an integer".into())),
        }
    }
}

/// The two ids every create request must carry alongside the resource fields.
#[derive(Debug, Clone)]
pub struct RequestOwner {
    pub organization_id: Uuid,
    /// The identity provider's user id; resolved to a profile server-side.
    pub identity_id: String,
}

impl RequestOwner {
    /// Pulls `organizationId` and `userId` (or their snake_case spellings)
    /// out of a create body.
    pub fn from_body(body: &Value) -> Result<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".into()))?;

        let field = |camel: &str, snake: &str| {
            object
                .get(camel)
                .or_else(|| object.get(snake))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let (organization_id, identity_id) =
            match (field("organizationId", "organization_id"), field("userId", "user_id")) {
                (Some(org), Some(user)) => (org, user),
                _ => {
                    return Err(AppError::BadRequest(
                        "Organization ID and user ID are required".into(),
                    ))
                }
            };

        Ok(Self {
            organization_id: parse_organization_id(organization_id)?,
            identity_id: identity_id.to_string(),
        })
    }
}

fn parse_organization_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid organization ID".into()))
}

/// Optional date field in a create body. Takes the same formats as the list
/// `startDate`/`endDate` bounds; null or blank means "use the default".
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> std::result::Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_iso_date(&raw).map(Some).ok_or_else(|| {
            de::Error::custom(format!("invalid date `{}`, expected YYYY-MM-DD", raw))
        }),
    }
}
