use super::ITemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use fidelo_domain::{MessageTemplate, ID};

pub struct InMemoryTemplateRepo {
    templates: std::sync::Mutex<Vec<MessageTemplate>>,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for InMemoryTemplateRepo {
    async fn upsert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        delete_by(&self.templates, |t| {
            t.tenant_id == template.tenant_id && t.kind == template.kind
        });
        insert(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        find(template_id, &self.templates)
    }

    async fn find_active_by_tenant(&self, tenant_id: &ID) -> anyhow::Result<Vec<MessageTemplate>> {
        Ok(find_by(&self.templates, |t| {
            &t.tenant_id == tenant_id && t.active
        }))
    }

    async fn delete(&self, template_id: &ID) -> Option<MessageTemplate> {
        delete(template_id, &self.templates)
    }
}
