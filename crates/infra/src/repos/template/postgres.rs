use super::ITemplateRepo;
use fidelo_domain::{MessageTemplate, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresTemplateRepo {
    pool: PgPool,
}

impl PostgresTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TemplateRaw {
    template_uid: Uuid,
    tenant_uid: Uuid,
    reminder_kind: String,
    body: String,
    active: bool,
}

impl From<TemplateRaw> for MessageTemplate {
    fn from(e: TemplateRaw) -> Self {
        Self {
            id: e.template_uid.into(),
            tenant_id: e.tenant_uid.into(),
            kind: e.reminder_kind.parse().unwrap(),
            body: e.body,
            active: e.active,
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for PostgresTemplateRepo {
    async fn upsert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_templates(template_uid, tenant_uid, reminder_kind, body, active)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (tenant_uid, reminder_kind)
            DO UPDATE SET template_uid = EXCLUDED.template_uid,
                body = EXCLUDED.body,
                active = EXCLUDED.active
            "#,
        )
        .bind(template.id.inner_ref())
        .bind(template.tenant_id.inner_ref())
        .bind(template.kind.as_str())
        .bind(&template.body)
        .bind(template.active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to upsert template: {:?}. DB returned error: {:?}",
                template, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM reminder_templates
            WHERE template_uid = $1
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|template| template.into())
    }

    async fn find_active_by_tenant(&self, tenant_id: &ID) -> anyhow::Result<Vec<MessageTemplate>> {
        let templates = sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM reminder_templates
            WHERE tenant_uid = $1 AND active
            "#,
        )
        .bind(tenant_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to list templates for tenant: {}. DB returned error: {:?}",
                tenant_id, e
            );
            e
        })?;
        Ok(templates.into_iter().map(|template| template.into()).collect())
    }

    async fn delete(&self, template_id: &ID) -> Option<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            DELETE FROM reminder_templates
            WHERE template_uid = $1
            RETURNING *
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|template| template.into())
    }
}
