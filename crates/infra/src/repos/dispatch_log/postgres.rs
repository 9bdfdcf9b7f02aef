use super::{IDispatchLogRepo, TryInsert};
use fidelo_domain::{DispatchLogEntry, ReminderKind, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresDispatchLogRepo {
    pool: PgPool,
}

impl PostgresDispatchLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DispatchLogRaw {
    benefit_uid: Uuid,
    reminder_kind: String,
    outcome: String,
    error: Option<String>,
    sent_at: i64,
}

impl From<DispatchLogRaw> for DispatchLogEntry {
    fn from(e: DispatchLogRaw) -> Self {
        Self {
            benefit_id: e.benefit_uid.into(),
            kind: e.reminder_kind.parse().unwrap(),
            outcome: e.outcome.parse().unwrap(),
            error: e.error,
            sent_at: e.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IDispatchLogRepo for PostgresDispatchLogRepo {
    async fn try_insert(&self, entry: &DispatchLogEntry) -> anyhow::Result<TryInsert> {
        // The primary key on (benefit_uid, reminder_kind) is the idempotency
        // barrier. DO NOTHING turns a lost race into AlreadyExists instead of
        // a driver error.
        let res = sqlx::query(
            r#"
            INSERT INTO dispatch_log
            (benefit_uid, reminder_kind, outcome, error, sent_at)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (benefit_uid, reminder_kind) DO NOTHING
            "#,
        )
        .bind(entry.benefit_id.inner_ref())
        .bind(entry.kind.as_str())
        .bind(entry.outcome.as_str())
        .bind(&entry.error)
        .bind(entry.sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert dispatch log entry: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;

        if res.rows_affected() == 1 {
            Ok(TryInsert::Inserted)
        } else {
            Ok(TryInsert::AlreadyExists)
        }
    }

    async fn find(&self, benefit_id: &ID, kind: ReminderKind) -> Option<DispatchLogEntry> {
        sqlx::query_as::<_, DispatchLogRaw>(
            r#"
            SELECT * FROM dispatch_log
            WHERE benefit_uid = $1 AND reminder_kind = $2
            "#,
        )
        .bind(benefit_id.inner_ref())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|entry| entry.into())
    }

    async fn find_by_benefit(&self, benefit_id: &ID) -> anyhow::Result<Vec<DispatchLogEntry>> {
        let entries = sqlx::query_as::<_, DispatchLogRaw>(
            r#"
            SELECT * FROM dispatch_log
            WHERE benefit_uid = $1
            ORDER BY sent_at
            "#,
        )
        .bind(benefit_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to list dispatch log for benefit: {}. DB returned error: {:?}",
                benefit_id, e
            );
            e
        })?;
        Ok(entries.into_iter().map(|entry| entry.into()).collect())
    }
}
