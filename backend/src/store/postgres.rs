use async_trait::async_trait;
use sqlx::{
    postgres::PgRow, query_builder::Separated, FromRow, PgPool, Postgres, QueryBuilder,
};
use uuid::Uuid;

use super::{ProfileStore, ResourceStore, StoreResult};
use crate::{
    filter::ListFilter,
    models::{
        invoice::Invoice, meeting::Meeting, payment::Payment, profile::Profile, project::Project,
        transaction::Transaction,
    },
    resource::Resource,
};

/// Postgres-backed store. Filters are pushed into the `WHERE` clause, so the
/// database does the narrowing and `limit` applies to matching rows.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Table layout of a resource.
pub trait PgRecord: Resource + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;
    /// Select list, also used for `RETURNING`.
    const COLUMNS: &'static str;
    /// Column order expected by [`PgRecord::bind_insert`].
    const INSERT_COLUMNS: &'static str;
    const DATE_COLUMN: &'static str;
    const TYPE_COLUMN: Option<&'static str> = None;

    fn bind_insert<'args>(new: Self::New, values: &mut Separated<'_, 'args, Postgres, &'static str>);
}

fn select_for<R: PgRecord>(organization_id: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM {} WHERE organization_id = ",
        R::COLUMNS,
        R::TABLE
    ));
    qb.push_bind(organization_id);
    qb
}

fn push_order_and_limit(qb: &mut QueryBuilder<'static, Postgres>, limit: Option<i64>) {
    qb.push(" ORDER BY created_at DESC, id");
    if let Some(limit) = limit {
        qb.push(" LIMIT ").push_bind(limit);
    }
}

#[async_trait]
impl<R: PgRecord> ResourceStore<R> for PgStore {
    async fn fetch_all(&self, organization_id: Uuid, limit: Option<i64>) -> StoreResult<Vec<R>> {
        let mut qb = select_for::<R>(organization_id);
        push_order_and_limit(&mut qb, limit);

        let rows = qb.build_query_as::<R>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn list(&self, organization_id: Uuid, filter: &ListFilter) -> StoreResult<Vec<R>> {
        if !filter.has_predicates() {
            return ResourceStore::<R>::fetch_all(self, organization_id, filter.limit).await;
        }

        let mut qb = select_for::<R>(organization_id);

        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
        if let (Some(kind), Some(column)) = (&filter.kind, R::TYPE_COLUMN) {
            qb.push(format!(" AND {} = ", column))
                .push_bind(kind.clone());
        }
        if let Some(start) = filter.start_date {
            qb.push(format!(" AND {} >= ", R::DATE_COLUMN))
                .push_bind(start);
        }
        if let Some(end) = filter.end_date {
            qb.push(format!(" AND {} <= ", R::DATE_COLUMN))
                .push_bind(end);
        }
        push_order_and_limit(&mut qb, filter.limit);

        let rows = qb.build_query_as::<R>().fetch_all(&self.pool).await?;
        tracing::debug!(
            table = R::TABLE,
            %organization_id,
            rows = rows.len(),
            "Filtered list query"
        );
        Ok(rows)
    }

    async fn insert(&self, record: R::New) -> StoreResult<R> {
        let mut qb: QueryBuilder<'static, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            R::TABLE,
            R::INSERT_COLUMNS
        ));
        let mut values = qb.separated(", ");
        R::bind_insert(record, &mut values);
        values.push_unseparated(")");
        qb.push(format!(" RETURNING {}", R::COLUMNS));

        let row = qb.build_query_as::<R>().fetch_one(&self.pool).await?;
        Ok(row)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn find_by_identity(&self, identity_id: &str) -> StoreResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, identity_id, email, full_name, created_at FROM profiles WHERE identity_id = $1",
        )
        .bind(identity_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn is_member(&self, organization_id: Uuid, profile_id: Uuid) -> StoreResult<bool> {
        let ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM organization_members WHERE organization_id = $1 AND profile_id = $2)",
        )
        .bind(organization_id)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ok)
    }
}

impl PgRecord for Invoice {
    const TABLE: &'static str = "invoices";
    const COLUMNS: &'static str = "id, organization_id, created_by, invoice_number, client_name, \
        client_email, amount, status, issue_date, due_date, notes, created_at";
    const INSERT_COLUMNS: &'static str = "organization_id, created_by, invoice_number, client_name, \
        client_email, amount, status, issue_date, due_date, notes";
    const DATE_COLUMN: &'static str = "issue_date";

    fn bind_insert<'args>(new: Self::New, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values
            .push_bind(new.organization_id)
            .push_bind(new.created_by)
            .push_bind(new.invoice_number)
            .push_bind(new.client_name)
            .push_bind(new.client_email)
            .push_bind(new.amount)
            .push_bind(new.status)
            .push_bind(new.issue_date)
            .push_bind(new.due_date)
            .push_bind(new.notes);
    }
}

impl PgRecord for Meeting {
    const TABLE: &'static str = "meetings";
    const COLUMNS: &'static str = "id, organization_id, created_by, title, description, \
        meeting_date, duration_minutes, location, status, created_at";
    const INSERT_COLUMNS: &'static str = "organization_id, created_by, title, description, \
        meeting_date, duration_minutes, location, status";
    const DATE_COLUMN: &'static str = "meeting_date";

    fn bind_insert<'args>(new: Self::New, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values
            .push_bind(new.organization_id)
            .push_bind(new.created_by)
            .push_bind(new.title)
            .push_bind(new.description)
            .push_bind(new.meeting_date)
            .push_bind(new.duration_minutes)
            .push_bind(new.location)
            .push_bind(new.status);
    }
}

impl PgRecord for Payment {
    const TABLE: &'static str = "payments";
    const COLUMNS: &'static str = "id, organization_id, created_by, invoice_id, \
        amount, method, reference, status, payment_date, created_at";
    const INSERT_COLUMNS: &'static str = "organization_id, created_by, invoice_id, amount, \
        method, reference, status, payment_date";
    const DATE_COLUMN: &'static str = "payment_date";

    fn bind_insert<'args>(new: Self::New, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values
            .push_bind(new.organization_id)
            .push_bind(new.created_by)
            .push_bind(new.invoice_id)
            .push_bind(new.amount)
            .push_bind(new.method)
            .push_bind(new.reference)
            .push_bind(new.status)
            .push_bind(new.payment_date);
    }
}

impl PgRecord for Project {
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static str = "id, organization_id, created_by, name, description, \
        budget, status, start_date, end_date, created_at";
    const INSERT_COLUMNS: &'static str = "organization_id, created_by, name, description, \
        budget, status, start_date, end_date";
    const DATE_COLUMN: &'static str = "start_date";

    fn bind_insert<'args>(new: Self::New, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values
            .push_bind(new.organization_id)
            .push_bind(new.created_by)
            .push_bind(new.name)
            .push_bind(new.description)
            .push_bind(new.budget)
            .push_bind(new.status)
            .push_bind(new.start_date)
            .push_bind(new.end_date);
    }
}

impl PgRecord for Transaction {
    const TABLE: &'static str = "transactions";
    const COLUMNS: &'static str = "id, organization_id, created_by, description, \
        amount, type, category, status, transaction_date, created_at";
    const INSERT_COLUMNS: &'static str = "organization_id, created_by, description, amount, \
        type, category, status, transaction_date";
    const DATE_COLUMN: &'static str = "transaction_date";
    const TYPE_COLUMN: Option<&'static str> = Some("type");

    fn bind_insert<'args>(new: Self::New, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values
            .push_bind(new.organization_id)
            .push_bind(new.created_by)
            .push_bind(new.description)
            .push_bind(new.amount)
            .push_bind(new.kind.as_str())
            .push_bind(new.category)
            .push_bind(new.status)
            .push_bind(new.transaction_date);
    }
}
