mod inmemory;
mod postgres;

pub use inmemory::InMemoryTemplateRepo;
pub use postgres::PostgresTemplateRepo;

use fidelo_domain::{MessageTemplate, ID};

#[async_trait::async_trait]
pub trait ITemplateRepo: Send + Sync {
    /// Inserts the template, replacing any previous template
    /// for the same (tenant, kind).
    async fn upsert(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<MessageTemplate>;
    async fn find_active_by_tenant(&self, tenant_id: &ID) -> anyhow::Result<Vec<MessageTemplate>>;
    async fn delete(&self, template_id: &ID) -> Option<MessageTemplate>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelo_domain::ReminderKind;

    #[tokio::test]
    async fn upsert_replaces_template_for_same_kind() {
        let repo = InMemoryTemplateRepo::new();
        let tenant_id = ID::new();
        let first = MessageTemplate::new(tenant_id.clone(), ReminderKind::D3, "first");
        let second = MessageTemplate::new(tenant_id.clone(), ReminderKind::D3, "second");
        let other = MessageTemplate::new(tenant_id.clone(), ReminderKind::D0, "other");

        repo.upsert(&first).await.unwrap();
        repo.upsert(&other).await.unwrap();
        repo.upsert(&second).await.unwrap();

        let active = repo.find_active_by_tenant(&tenant_id).await.unwrap();
        assert_eq!(active.len(), 2);
        let d3 = active
            .iter()
            .find(|t| t.kind == ReminderKind::D3)
            .unwrap();
        assert_eq!(d3.body, "second");
    }

    #[tokio::test]
    async fn inactive_templates_are_not_listed() {
        let repo = InMemoryTemplateRepo::new();
        let tenant_id = ID::new();
        let mut template = MessageTemplate::new(tenant_id.clone(), ReminderKind::D7, "body");
        template.active = false;
        repo.upsert(&template).await.unwrap();

        assert!(repo
            .find_active_by_tenant(&tenant_id)
            .await
            .unwrap()
            .is_empty());
    }
}
