use std::collections::HashSet;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProfileStore, ResourceStore, StoreResult};
use crate::{
    models::{
        invoice::Invoice, meeting::Meeting, payment::Payment, profile::Profile, project::Project,
        transaction::Transaction,
    },
    resource::Resource,
};

/// One vector per resource kind, in insertion order.
#[derive(Default)]
pub struct Tables {
    invoices: Vec<Invoice>,
    meetings: Vec<Meeting>,
    payments: Vec<Payment>,
    projects: Vec<Project>,
    transactions: Vec<Transaction>,
}

/// Selects the table a resource lives in.
pub trait MemoryTable: Resource {
    fn table(tables: &Tables) -> &Vec<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self>;
}

macro_rules! memory_table {
    ($ty:ty, $field:ident) => {
        impl MemoryTable for $ty {
            fn table(tables: &Tables) -> &Vec<Self> {
                &tables.$field
            }

            fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
                &mut tables.$field
            }
        }
    };
}

memory_table!(Invoice, invoices);
memory_table!(Meeting, meetings);
memory_table!(Payment, payments);
memory_table!(Project, projects);
memory_table!(Transaction, transactions);

/// In-process store. It cannot push filters down, so lists go through the
/// trait's bulk-fetch-then-filter fallback.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    profiles: RwLock<Vec<Profile>>,
    members: RwLock<HashSet<(Uuid, Uuid)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile for an identity-provider user id.
    pub async fn add_profile(&self, identity_id: &str, email: Option<&str>) -> Profile {
        let profile = Profile {
            id: Uuid::new_v4(),
            identity_id: identity_id.to_string(),
            email: email.map(str::to_string),
            full_name: None,
            created_at: OffsetDateTime::now_utc(),
        };
        self.profiles.write().await.push(profile.clone());
        profile
    }

    pub async fn add_member(&self, organization_id: Uuid, profile_id: Uuid) {
        self.members
            .write()
            .await
            .insert((organization_id, profile_id));
    }
}

#[async_trait]
impl<R: MemoryTable> ResourceStore<R> for MemoryStore {
    async fn fetch_all(&self, organization_id: Uuid, limit: Option<i64>) -> StoreResult<Vec<R>> {
        let tables = self.tables.read().await;
        let newest_first = R::table(&tables)
            .iter()
            .rev()
            .filter(|r| r.organization_id() == organization_id)
            .cloned();

        Ok(match limit {
            Some(limit) => newest_first.take(limit.max(0) as usize).collect(),
            None => newest_first.collect(),
        })
    }

    async fn insert(&self, record: R::New) -> StoreResult<R> {
        let record = R::from_new(record, Uuid::new_v4(), OffsetDateTime::now_utc());
        R::table_mut(&mut *self.tables.write().await).push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_identity(&self, identity_id: &str) -> StoreResult<Option<Profile>> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|p| p.identity_id == identity_id)
            .cloned())
    }

    async fn is_member(&self, organization_id: Uuid, profile_id: Uuid) -> StoreResult<bool> {
        Ok(self
            .members
            .read()
            .await
            .contains(&(organization_id, profile_id)))
    }
}
