use super::send_tenant_reminders::SendTenantRemindersUseCase;
use crate::error::FideloError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use fidelo_api_structs::run_dispatch::{APIResponse, RequestBody};
use fidelo_domain::DispatchSummary;
use fidelo_infra::FideloContext;
use tracing::{error, warn};

pub async fn run_dispatch_controller(
    ctx: web::Data<FideloContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, FideloError> {
    let usecase = SendAllRemindersUseCase { force: body.0.force };
    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary)))
        .map_err(|_| FideloError::InternalError)
}

/// Fans the dispatch out over every tenant, sequentially so the inter-send
/// throttle stays global, and isolates tenant failures: one broken tenant
/// never prevents the others from running.
#[derive(Debug)]
pub struct SendAllRemindersUseCase {
    pub force: bool,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendAllRemindersUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendAllReminders";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        let mut summary = DispatchSummary::default();

        let tenants = match ctx.repos.tenants.find_all().await {
            Ok(tenants) => tenants,
            Err(e) => {
                error!("Unable to load tenant list for dispatch: {:?}", e);
                summary.errors += 1;
                return Ok(summary);
            }
        };

        for tenant in tenants {
            let usecase = SendTenantRemindersUseCase {
                tenant_id: tenant.id.clone(),
                force: self.force,
            };
            match execute(usecase, ctx).await {
                Ok(res) => summary.absorb(&res),
                Err(e) => {
                    warn!(
                        "Reminder dispatch aborted for tenant: {}: {:?}",
                        tenant.id, e
                    );
                    summary.errors += 1;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fidelo_domain::{
        BenefitRecord, BenefitStatus, MessageTemplate, ReminderKind, ReminderSettings, Tenant, ID,
    };
    use fidelo_infra::{IBenefitRepo, IMessageSender, ISys};
    use std::sync::{Arc, Mutex};

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    #[derive(Default)]
    struct CountingSender {
        sent: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl IMessageSender for CountingSender {
        async fn send(&self, _phone: &str, _text: &str) -> anyhow::Result<()> {
            *self.sent.lock().unwrap() += 1;
            Ok(())
        }
    }

    /// Delegates to the real in-memory repo but fails candidate listing for
    /// one tenant, to exercise per-tenant isolation.
    struct FailingBenefitRepo {
        fail_tenant: ID,
        inner: Arc<dyn IBenefitRepo>,
    }

    #[async_trait::async_trait]
    impl IBenefitRepo for FailingBenefitRepo {
        async fn insert(&self, benefit: &BenefitRecord) -> anyhow::Result<()> {
            self.inner.insert(benefit).await
        }

        async fn find(&self, benefit_id: &ID) -> Option<BenefitRecord> {
            self.inner.find(benefit_id).await
        }

        async fn find_reminder_candidates(
            &self,
            tenant_id: &ID,
        ) -> anyhow::Result<Vec<BenefitRecord>> {
            if tenant_id == &self.fail_tenant {
                anyhow::bail!("benefit store unreachable");
            }
            self.inner.find_reminder_candidates(tenant_id).await
        }

        async fn delete(&self, benefit_id: &ID) -> Option<BenefitRecord> {
            self.inner.delete(benefit_id).await
        }
    }

    fn test_ctx(sender: Arc<CountingSender>) -> FideloContext {
        let mut ctx = FideloContext::create_inmemory();
        // 2026-08-10 12:00 UTC
        ctx.sys = Arc::new(StaticTimeSys(1786363200000));
        ctx.sender = sender;
        ctx
    }

    async fn seed_tenant_with_candidate(ctx: &FideloContext, expires_at: NaiveDate) -> Tenant {
        let mut tenant = Tenant::new("Acme Cashback");
        tenant.settings.reminders = ReminderSettings {
            enabled: true,
            send_hour: None,
            send_minute: None,
            delay_min_secs: 0,
            delay_max_secs: 0,
        };
        ctx.repos.tenants.insert(&tenant).await.unwrap();
        let template = MessageTemplate::new(tenant.id.clone(), ReminderKind::D3, "vence");
        ctx.repos.templates.upsert(&template).await.unwrap();
        let benefit = BenefitRecord {
            id: ID::new(),
            tenant_id: tenant.id.clone(),
            client_id: ID::new(),
            client_name: "Ana".to_string(),
            client_phone: Some("+551100".to_string()),
            client_tax_id: None,
            amount: 10.0,
            expires_at: Some(expires_at),
            status: BenefitStatus::Available,
        };
        ctx.repos.benefits.insert(&benefit).await.unwrap();
        tenant
    }

    fn expiring_in_three_days(ctx: &FideloContext) -> NaiveDate {
        let now = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(
            ctx.sys.get_timestamp_millis(),
        )
        .unwrap()
        .with_timezone(&ctx.config.utc_offset);
        now.date_naive() + chrono::Duration::days(3)
    }

    #[tokio::test]
    async fn it_sums_counters_across_tenants() {
        let sender = Arc::new(CountingSender::default());
        let ctx = test_ctx(sender.clone());
        let expires = expiring_in_three_days(&ctx);
        seed_tenant_with_candidate(&ctx, expires).await;
        seed_tenant_with_candidate(&ctx, expires).await;

        let summary = execute(SendAllRemindersUseCase { force: true }, &ctx)
            .await
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.sent, 2);
        assert_eq!(summary.errors, 0);
        assert_eq!(*sender.sent.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn one_broken_tenant_does_not_stop_the_others() {
        let sender = Arc::new(CountingSender::default());
        let mut ctx = test_ctx(sender.clone());
        let expires = expiring_in_three_days(&ctx);
        let tenant_a = seed_tenant_with_candidate(&ctx, expires).await;
        seed_tenant_with_candidate(&ctx, expires).await;

        ctx.repos.benefits = Arc::new(FailingBenefitRepo {
            fail_tenant: tenant_a.id.clone(),
            inner: ctx.repos.benefits.clone(),
        });

        let summary = execute(SendAllRemindersUseCase { force: true }, &ctx)
            .await
            .unwrap();

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.errors, 1);
    }
}
