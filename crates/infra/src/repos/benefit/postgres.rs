use super::IBenefitRepo;
use chrono::NaiveDate;
use fidelo_domain::{BenefitRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresBenefitRepo {
    pool: PgPool,
}

impl PostgresBenefitRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BenefitRaw {
    benefit_uid: Uuid,
    tenant_uid: Uuid,
    client_uid: Uuid,
    client_name: String,
    client_phone: Option<String>,
    client_tax_id: Option<String>,
    amount: f64,
    expires_at: Option<NaiveDate>,
    status: String,
}

impl From<BenefitRaw> for BenefitRecord {
    fn from(e: BenefitRaw) -> Self {
        Self {
            id: e.benefit_uid.into(),
            tenant_id: e.tenant_uid.into(),
            client_id: e.client_uid.into(),
            client_name: e.client_name,
            client_phone: e.client_phone,
            client_tax_id: e.client_tax_id,
            amount: e.amount,
            expires_at: e.expires_at,
            status: e.status.parse().unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl IBenefitRepo for PostgresBenefitRepo {
    async fn insert(&self, benefit: &BenefitRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO benefits
            (benefit_uid, tenant_uid, client_uid, client_name, client_phone, client_tax_id, amount, expires_at, status)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(benefit.id.inner_ref())
        .bind(benefit.tenant_id.inner_ref())
        .bind(benefit.client_id.inner_ref())
        .bind(&benefit.client_name)
        .bind(&benefit.client_phone)
        .bind(&benefit.client_tax_id)
        .bind(benefit.amount)
        .bind(benefit.expires_at)
        .bind(benefit.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert benefit: {:?}. DB returned error: {:?}",
                benefit, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, benefit_id: &ID) -> Option<BenefitRecord> {
        sqlx::query_as::<_, BenefitRaw>(
            r#"
            SELECT * FROM benefits
            WHERE benefit_uid = $1
            "#,
        )
        .bind(benefit_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|benefit| benefit.into())
    }

    async fn find_reminder_candidates(&self, tenant_id: &ID) -> anyhow::Result<Vec<BenefitRecord>> {
        let benefits = sqlx::query_as::<_, BenefitRaw>(
            r#"
            SELECT * FROM benefits
            WHERE tenant_uid = $1
            AND status = 'available'
            AND expires_at IS NOT NULL
            ORDER BY expires_at, benefit_uid
            "#,
        )
        .bind(tenant_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to list reminder candidates for tenant: {}. DB returned error: {:?}",
                tenant_id, e
            );
            e
        })?;
        Ok(benefits.into_iter().map(|benefit| benefit.into()).collect())
    }

    async fn delete(&self, benefit_id: &ID) -> Option<BenefitRecord> {
        sqlx::query_as::<_, BenefitRaw>(
            r#"
            DELETE FROM benefits
            WHERE benefit_uid = $1
            RETURNING *
            "#,
        )
        .bind(benefit_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|benefit| benefit.into())
    }
}
