//! List filters.
//!
//! A `ListFilter` is built once per request from the query string and handed
//! to the store. Stores that can filter server-side (Postgres) translate it
//! into SQL; the rest fall back to [`ListFilter::apply`], which evaluates the
//! same predicates in memory. Every predicate is pure, so applying a filter to
//! an already-filtered set changes nothing.

use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

use crate::{
    error::{AppError, Result},
    models::common::ListParams,
    resource::Resource,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<String>,
    pub kind: Option<String>,
    /// Inclusive lower bound on the resource's date field.
    pub start_date: Option<Date>,
    /// Inclusive upper bound on the resource's date field.
    pub end_date: Option<Date>,
    pub limit: Option<i64>,
}

impl ListFilter {
    /// Builds the filter for `R`, dropping parameters `R` doesn't support
    /// (`type` and `limit` only mean something for some resources).
    pub fn for_resource<R: Resource>(params: &ListParams) -> Result<Self> {
        let mut filter = Self::date_range(params)?;
        filter.status = equality_value(params.status.as_deref());
        if R::HAS_TYPE {
            filter.kind = equality_value(params.kind.as_deref());
        }
        if R::SUPPORTS_LIMIT {
            filter.limit = params.limit()?;
        }
        Ok(filter)
    }

    /// Only the `startDate`/`endDate` bounds.
    pub fn date_range(params: &ListParams) -> Result<Self> {
        Ok(Self {
            start_date: parse_date_param("startDate", params.start_date.as_deref())?,
            end_date: parse_date_param("endDate", params.end_date.as_deref())?,
            ..Default::default()
        })
    }

    /// Whether anything besides `limit` narrows the result.
    pub fn has_predicates(&self) -> bool {
        self.status.is_some()
            || self.kind.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }

    pub fn matches<R: Resource>(&self, record: &R) -> bool {
        if let Some(status) = &self.status {
            if record.status() != status {
                return false;
            }
        }
        if let Some(kind) = &self.kind {
            if record.kind() != Some(kind.as_str()) {
                return false;
            }
        }
        let date = record.record_date();
        if self.start_date.is_some_and(|start| date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| date > end) {
            return false;
        }
        true
    }

    /// In-memory fallback: keeps matching records in their original order,
    /// then truncates to `limit`.
    pub fn apply<R: Resource>(&self, records: Vec<R>) -> Vec<R> {
        let matching = records.into_iter().filter(|r| self.matches(r));
        match self.limit {
            Some(limit) => matching.take(limit.max(0) as usize).collect(),
            None => matching.collect(),
        }
    }
}

/// `None` for absent, blank, or the `"all"` sentinel.
fn equality_value(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case("all") => None,
        Some(v) => Some(v.to_string()),
    }
}

/// Accepts `YYYY-MM-DD`, or a full RFC 3339 timestamp truncated to its date.
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| OffsetDateTime::parse(raw, &Rfc3339).ok().map(|dt| dt.date()))
}

fn parse_date_param(name: &str, raw: Option<&str>) -> Result<Option<Date>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_iso_date(value)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("{} must be an ISO date (YYYY-MM-DD)", name))),
    }
}
