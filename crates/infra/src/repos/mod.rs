mod benefit;
mod dispatch_log;
mod shared;
mod template;
mod tenant;

use benefit::{InMemoryBenefitRepo, PostgresBenefitRepo};
use dispatch_log::{InMemoryDispatchLogRepo, PostgresDispatchLogRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use template::{InMemoryTemplateRepo, PostgresTemplateRepo};
use tenant::{InMemoryTenantRepo, PostgresTenantRepo};
use tracing::info;

pub use benefit::IBenefitRepo;
pub use dispatch_log::{IDispatchLogRepo, TryInsert};
pub use template::ITemplateRepo;
pub use tenant::ITenantRepo;

#[derive(Clone)]
pub struct Repos {
    pub tenants: Arc<dyn ITenantRepo>,
    pub templates: Arc<dyn ITemplateRepo>,
    pub benefits: Arc<dyn IBenefitRepo>,
    pub dispatch_log: Arc<dyn IDispatchLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            tenants: Arc::new(PostgresTenantRepo::new(pool.clone())),
            templates: Arc::new(PostgresTemplateRepo::new(pool.clone())),
            benefits: Arc::new(PostgresBenefitRepo::new(pool.clone())),
            dispatch_log: Arc::new(PostgresDispatchLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tenants: Arc::new(InMemoryTenantRepo::new()),
            templates: Arc::new(InMemoryTemplateRepo::new()),
            benefits: Arc::new(InMemoryBenefitRepo::new()),
            dispatch_log: Arc::new(InMemoryDispatchLogRepo::new()),
        }
    }
}
