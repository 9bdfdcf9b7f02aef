use super::ITenantRepo;
use crate::repos::shared::inmemory_repo::*;
use fidelo_domain::{Tenant, ID};

pub struct InMemoryTenantRepo {
    tenants: std::sync::Mutex<Vec<Tenant>>,
}

impl InMemoryTenantRepo {
    pub fn new() -> Self {
        Self {
            tenants: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITenantRepo for InMemoryTenantRepo {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<()> {
        insert(tenant, &self.tenants);
        Ok(())
    }

    async fn save(&self, tenant: &Tenant) -> anyhow::Result<()> {
        save(tenant, &self.tenants);
        Ok(())
    }

    async fn find(&self, tenant_id: &ID) -> Option<Tenant> {
        find(tenant_id, &self.tenants)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Tenant>> {
        Ok(find_by(&self.tenants, |_| true))
    }

    async fn delete(&self, tenant_id: &ID) -> Option<Tenant> {
        delete(tenant_id, &self.tenants)
    }
}
