use super::ITenantRepo;
use fidelo_domain::{Tenant, ID};
use serde_json::Value;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresTenantRepo {
    pool: PgPool,
}

impl PostgresTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantRaw {
    tenant_uid: Uuid,
    name: String,
    settings: Value,
}

impl From<TenantRaw> for Tenant {
    fn from(e: TenantRaw) -> Self {
        Self {
            id: e.tenant_uid.into(),
            name: e.name,
            settings: serde_json::from_value(e.settings).unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl ITenantRepo for PostgresTenantRepo {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tenants(tenant_uid, name, settings)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(tenant.id.inner_ref())
        .bind(&tenant.name)
        .bind(Json(&tenant.settings))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert tenant: {:?}. DB returned error: {:?}",
                tenant, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, tenant: &Tenant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tenants
            SET name = $2,
            settings = $3
            WHERE tenant_uid = $1
            "#,
        )
        .bind(tenant.id.inner_ref())
        .bind(&tenant.name)
        .bind(Json(&tenant.settings))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save tenant: {:?}. DB returned error: {:?}",
                tenant, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, tenant_id: &ID) -> Option<Tenant> {
        sqlx::query_as::<_, TenantRaw>(
            r#"
            SELECT * FROM tenants
            WHERE tenant_uid = $1
            "#,
        )
        .bind(tenant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|tenant| tenant.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Tenant>> {
        let tenants = sqlx::query_as::<_, TenantRaw>(
            r#"
            SELECT * FROM tenants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to list tenants. DB returned error: {:?}", e);
            e
        })?;
        Ok(tenants.into_iter().map(|tenant| tenant.into()).collect())
    }

    async fn delete(&self, tenant_id: &ID) -> Option<Tenant> {
        sqlx::query_as::<_, TenantRaw>(
            r#"
            DELETE FROM tenants
            WHERE tenant_uid = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|tenant| tenant.into())
    }
}
