use super::IBenefitRepo;
use crate::repos::shared::inmemory_repo::*;
use fidelo_domain::{BenefitRecord, ID};

pub struct InMemoryBenefitRepo {
    benefits: std::sync::Mutex<Vec<BenefitRecord>>,
}

impl InMemoryBenefitRepo {
    pub fn new() -> Self {
        Self {
            benefits: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBenefitRepo for InMemoryBenefitRepo {
    async fn insert(&self, benefit: &BenefitRecord) -> anyhow::Result<()> {
        insert(benefit, &self.benefits);
        Ok(())
    }

    async fn find(&self, benefit_id: &ID) -> Option<BenefitRecord> {
        find(benefit_id, &self.benefits)
    }

    async fn find_reminder_candidates(&self, tenant_id: &ID) -> anyhow::Result<Vec<BenefitRecord>> {
        let mut candidates = find_by(&self.benefits, |b| {
            &b.tenant_id == tenant_id && b.is_reminder_candidate()
        });
        candidates.sort_by_key(|b| (b.expires_at, b.id.as_string()));
        Ok(candidates)
    }

    async fn delete(&self, benefit_id: &ID) -> Option<BenefitRecord> {
        delete(benefit_id, &self.benefits)
    }
}
