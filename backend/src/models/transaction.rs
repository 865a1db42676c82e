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

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// Stored transaction. `type` is kept as the stored string so rows written by
/// other tools still load.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: Option<String>,
    pub status: String,
    pub transaction_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub category: Option<String>,
    pub status: String,
    pub transaction_date: Date,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    #[validate(length(min = 1, max = 500, message = "description is required"))]
    pub description: String,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[validate(length(max = 64))]
    pub category: Option<String>,
    #[validate(length(max = 32))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub transaction_date: Option<Date>,
}

impl Resource for Transaction {
    type Draft = CreateTransactionRequest;
    type New = NewTransaction;

    const NAME: &'static str = "transaction";
    const DEFAULT_STATUS: &'static str = "completed";
    const HAS_TYPE: bool = true;
    const SUPPORTS_LIMIT: bool = true;

    fn store(state: &AppState) -> &dyn ResourceStore<Self> {
        state.transactions.as_ref()
    }

    fn prepare(draft: CreateTransactionRequest, ctx: NewRecordContext) -> NewTransaction {
        NewTransaction {
            organization_id: ctx.organization_id,
            created_by: ctx.created_by,
            description: draft.description,
            amount: to_cents(draft.amount),
            kind: draft.kind,
            category: draft.category,
            status: status_or_default(draft.status, Self::DEFAULT_STATUS),
            transaction_date: draft.transaction_date.unwrap_or(ctx.today),
        }
    }

    fn from_new(new: NewTransaction, id: Uuid, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            organization_id: new.organization_id,
            created_by: new.created_by,
            description: new.description,
            amount: new.amount,
            kind: new.kind.as_str().to_string(),
            category: new.category,
            status: new.status,
            transaction_date: new.transaction_date,
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
        self.transaction_date
    }

    fn kind(&self) -> Option<&str> {
        Some(&self.kind)
    }
}
