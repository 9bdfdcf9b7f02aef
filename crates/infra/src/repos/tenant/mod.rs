mod inmemory;
mod postgres;

pub use inmemory::InMemoryTenantRepo;
pub use postgres::PostgresTenantRepo;

use fidelo_domain::{Tenant, ID};

#[async_trait::async_trait]
pub trait ITenantRepo: Send + Sync {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<()>;
    async fn save(&self, tenant: &Tenant) -> anyhow::Result<()>;
    async fn find(&self, tenant_id: &ID) -> Option<Tenant>;
    async fn find_all(&self) -> anyhow::Result<Vec<Tenant>>;
    async fn delete(&self, tenant_id: &ID) -> Option<Tenant>;
}
