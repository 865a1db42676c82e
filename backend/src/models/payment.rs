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
pub struct Payment {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub invoice_id: Option<Uuid>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub status: String,
    pub payment_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub invoice_id: Option<Uuid>,
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub status: String,
    pub payment_date: Date,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub invoice_id: Option<Uuid>,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    #[validate(length(max = 32))]
    pub method: Option<String>,
    pub reference: Option<String>,
    #[validate(length(max = 32))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub payment_date: Option<Date>,
}

impl Resource for Payment {
    type Draft = CreatePaymentRequest;
    type New = NewPayment;

    const NAME: &'static str = "payment";
    const DEFAULT_STATUS: &'static str = "completed";

    fn store(state: &AppState) -> &dyn ResourceStore<Self> {
        state.payments.as_ref()
    }

    fn prepare(draft: CreatePaymentRequest, ctx: NewRecordContext) -> NewPayment {
        NewPayment {
            organization_id: ctx.organization_id,
            created_by: ctx.created_by,
            invoice_id: draft.invoice_id,
            amount: to_cents(draft.amount),
            method: draft.method,
            reference: draft.reference,
            status: status_or_default(draft.status, Self::DEFAULT_STATUS),
            payment_date: draft.payment_date.unwrap_or(ctx.today),
        }
    }

    fn from_new(new: NewPayment, id: Uuid, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            organization_id: new.organization_id,
            created_by: new.created_by,
            invoice_id: new.invoice_id,
            amount: new.amount,
            method: new.method,
            reference: new.reference,
            status: new.status,
            payment_date: new.payment_date,
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
        self.payment_date
    }
}
