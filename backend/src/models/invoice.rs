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
pub struct Invoice {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: String,
    pub issue_date: Date,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub amount: Decimal,
    pub status: String,
    pub issue_date: Date,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, max = 64, message = "invoice_number is required"))]
    pub invoice_number: String,
    #[validate(length(min = 1, max = 200, message = "client_name is required"))]
    pub client_name: String,
    #[validate(email(message = "client_email must be a valid email address"))]
    pub client_email: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    #[validate(length(max = 32))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub issue_date: Option<Date>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub due_date: Option<Date>,
    pub notes: Option<String>,
}

impl Resource for Invoice {
    type Draft = CreateInvoiceRequest;
    type New = NewInvoice;

    const NAME: &'static str = "invoice";
    const DEFAULT_STATUS: &'static str = "draft";

    fn store(state: &AppState) -> &dyn ResourceStore<Self> {
        state.invoices.as_ref()
    }

    fn prepare(draft: CreateInvoiceRequest, ctx: NewRecordContext) -> NewInvoice {
        NewInvoice {
            organization_id: ctx.organization_id,
            created_by: ctx.created_by,
            invoice_number: draft.invoice_number,
            client_name: draft.client_name,
            client_email: draft.client_email,
            amount: to_cents(draft.amount),
            status: status_or_default(draft.status, Self::DEFAULT_STATUS),
            issue_date: draft.issue_date.unwrap_or(ctx.today),
            due_date: draft.due_date,
            notes: draft.notes,
        }
    }

    fn from_new(new: NewInvoice, id: Uuid, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            organization_id: new.organization_id,
            created_by: new.created_by,
            invoice_number: new.invoice_number,
            client_name: new.client_name,
            client_email: new.client_email,
            amount: new.amount,
            status: new.status,
            issue_date: new.issue_date,
            due_date: new.due_date,
            notes: new.notes,
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
        self.issue_date
    }
}
