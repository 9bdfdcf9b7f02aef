mod inmemory;
mod postgres;

pub use inmemory::InMemoryBenefitRepo;
pub use postgres::PostgresBenefitRepo;

use fidelo_domain::{BenefitRecord, ID};

#[async_trait::async_trait]
pub trait IBenefitRepo: Send + Sync {
    async fn insert(&self, benefit: &BenefitRecord) -> anyhow::Result<()>;
    async fn find(&self, benefit_id: &ID) -> Option<BenefitRecord>;
    /// All available benefits with a known expiration for the tenant,
    /// ordered by ascending expiration date for deterministic dispatch.
    async fn find_reminder_candidates(&self, tenant_id: &ID) -> anyhow::Result<Vec<BenefitRecord>>;
    async fn delete(&self, benefit_id: &ID) -> Option<BenefitRecord>;
}
