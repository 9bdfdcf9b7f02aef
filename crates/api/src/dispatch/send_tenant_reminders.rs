use crate::error::FideloError;
use crate::shared::usecase::UseCase;
use actix_web::rt::time::sleep;
use chrono::{DateTime, Utc};
use fidelo_domain::{
    days_until, reminder_vars, render_template, DispatchLogEntry, DispatchOutcome, MessageTemplate,
    ReminderKind, ReminderSettings, TenantRunResult, ID,
};
use fidelo_infra::{FideloContext, TryInsert};
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Processes one tenant's expiring benefits at the current point in time:
/// schedule window, at-most-once ledger, template rendering and throttled
/// delivery through the outbound channel.
#[derive(Debug)]
pub struct SendTenantRemindersUseCase {
    pub tenant_id: ID,
    /// Bypasses the schedule-window check. The enabled flag and the ledger
    /// still apply.
    pub force: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    TenantNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for FideloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("Tenant with id: {} was not found", tenant_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Pause between consecutive sends so the shared message provider is not
/// hammered. The duration is drawn uniformly from the tenant's delay bounds.
async fn throttle_delay(settings: &ReminderSettings) {
    let (min, max) = (settings.delay_min_secs, settings.delay_max_secs);
    let secs = if min >= max {
        min
    } else {
        rand::thread_rng().gen_range(min..=max)
    };
    if secs == 0 {
        return;
    }
    sleep(Duration::from_secs(secs as u64)).await;
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTenantRemindersUseCase {
    type Response = TenantRunResult;

    type Error = UseCaseError;

    const NAME: &'static str = "SendTenantReminders";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        let mut res = TenantRunResult::default();

        let tenant = ctx
            .repos
            .tenants
            .find(&self.tenant_id)
            .await
            .ok_or_else(|| UseCaseError::TenantNotFound(self.tenant_id.clone()))?;
        let settings = tenant.settings.reminders.clone();

        if !settings.enabled {
            res.skipped_disabled = true;
            return Ok(res);
        }

        let now_millis = ctx.sys.get_timestamp_millis();
        let local_now = DateTime::<Utc>::from_timestamp_millis(now_millis)
            .unwrap_or_default()
            .with_timezone(&ctx.config.utc_offset);

        if !self.force && !settings.window_matches(&local_now.time()) {
            res.skipped_out_of_window = true;
            return Ok(res);
        }

        let templates: HashMap<ReminderKind, MessageTemplate> = ctx
            .repos
            .templates
            .find_active_by_tenant(&tenant.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|t| (t.kind, t))
            .collect();
        if templates.is_empty() {
            return Ok(res);
        }

        let candidates = ctx
            .repos
            .benefits
            .find_reminder_candidates(&tenant.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let today = local_now.date_naive();
        let mut send_attempts = 0;

        for benefit in candidates {
            let expires = match benefit.expires_at {
                Some(expires) => expires,
                None => continue,
            };
            let kind = match ReminderKind::from_days_remaining(days_until(today, expires)) {
                Some(kind) => kind,
                None => continue,
            };
            let template = match templates.get(&kind) {
                Some(template) => template,
                None => continue,
            };
            res.processed += 1;

            // The ledger is the idempotency barrier: a pair that is already
            // recorded, with either outcome, is never attempted again.
            if ctx.repos.dispatch_log.find(&benefit.id, kind).await.is_some() {
                continue;
            }

            let phone = match benefit
                .client_phone
                .as_deref()
                .filter(|phone| !phone.trim().is_empty())
            {
                Some(phone) => phone.to_string(),
                None => {
                    let entry = DispatchLogEntry {
                        benefit_id: benefit.id.clone(),
                        kind,
                        outcome: DispatchOutcome::Failed,
                        error: Some("missing phone".into()),
                        sent_at: ctx.sys.get_timestamp_millis(),
                    };
                    if ctx.repos.dispatch_log.try_insert(&entry).await.is_err() {
                        warn!(
                            "Unable to record missing phone for benefit: {}",
                            benefit.id
                        );
                    }
                    res.errors += 1;
                    continue;
                }
            };

            let vars = reminder_vars(&benefit, &tenant.name, kind, expires);
            let text = render_template(&template.body, &vars);

            if send_attempts > 0 {
                throttle_delay(&settings).await;
            }
            send_attempts += 1;

            match ctx.sender.send(&phone, &text).await {
                Ok(()) => {
                    let entry = DispatchLogEntry {
                        benefit_id: benefit.id.clone(),
                        kind,
                        outcome: DispatchOutcome::Sent,
                        error: None,
                        sent_at: ctx.sys.get_timestamp_millis(),
                    };
                    match ctx.repos.dispatch_log.try_insert(&entry).await {
                        // A concurrent or duplicate run already recorded this
                        // pair; the send happened but must not be counted twice.
                        Ok(TryInsert::AlreadyExists) => {}
                        Ok(TryInsert::Inserted) => res.sent += 1,
                        Err(e) => {
                            warn!(
                                "Unable to record sent reminder for benefit: {}: {:?}",
                                benefit.id, e
                            );
                            res.errors += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "Outbound channel rejected reminder for benefit: {}: {:?}",
                        benefit.id, e
                    );
                    let entry = DispatchLogEntry {
                        benefit_id: benefit.id.clone(),
                        kind,
                        outcome: DispatchOutcome::Failed,
                        error: Some(e.to_string()),
                        sent_at: ctx.sys.get_timestamp_millis(),
                    };
                    if ctx.repos.dispatch_log.try_insert(&entry).await.is_err() {
                        warn!(
                            "Unable to record failed reminder for benefit: {}",
                            benefit.id
                        );
                    }
                    res.errors += 1;
                }
            }
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use fidelo_domain::{BenefitRecord, BenefitStatus, Tenant};
    use fidelo_infra::{IMessageSender, ISys};
    use std::sync::{Arc, Mutex};

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(String, String)>>,
        fail_with: Option<String>,
    }

    impl RecordingSender {
        fn failing(err: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_with: Some(err.to_string()),
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl IMessageSender for RecordingSender {
        async fn send(&self, phone: &str, text: &str) -> anyhow::Result<()> {
            if let Some(err) = &self.fail_with {
                anyhow::bail!("{}", err);
            }
            self.sent
                .lock()
                .unwrap()
                .push((phone.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Millis timestamp for the given tenant-local wall-clock time, using the
    /// default UTC-3 offset of the test configuration.
    fn local_millis(date: NaiveDate, hour: u32, minute: u32) -> i64 {
        FixedOffset::east_opt(-3 * 3600)
            .unwrap()
            .from_local_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
            .unwrap()
            .timestamp_millis()
    }

    fn test_ctx(now_millis: i64, sender: Arc<RecordingSender>) -> FideloContext {
        let mut ctx = FideloContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now_millis));
        ctx.sender = sender;
        ctx
    }

    fn enabled_settings() -> ReminderSettings {
        ReminderSettings {
            enabled: true,
            send_hour: None,
            send_minute: None,
            delay_min_secs: 0,
            delay_max_secs: 0,
        }
    }

    async fn seed_tenant(ctx: &FideloContext, settings: ReminderSettings) -> Tenant {
        let mut tenant = Tenant::new("Acme Cashback");
        tenant.settings.reminders = settings;
        ctx.repos.tenants.insert(&tenant).await.unwrap();
        tenant
    }

    async fn seed_template(ctx: &FideloContext, tenant: &Tenant, kind: ReminderKind, body: &str) {
        let template = MessageTemplate::new(tenant.id.clone(), kind, body);
        ctx.repos.templates.upsert(&template).await.unwrap();
    }

    async fn seed_benefit(
        ctx: &FideloContext,
        tenant: &Tenant,
        expires_at: NaiveDate,
        phone: Option<&str>,
    ) -> BenefitRecord {
        let benefit = BenefitRecord {
            id: ID::new(),
            tenant_id: tenant.id.clone(),
            client_id: ID::new(),
            client_name: "Ana".to_string(),
            client_phone: phone.map(|p| p.to_string()),
            client_tax_id: Some("123.456.789-00".to_string()),
            amount: 42.5,
            expires_at: Some(expires_at),
            status: BenefitStatus::Available,
        };
        ctx.repos.benefits.insert(&benefit).await.unwrap();
        benefit
    }

    fn usecase(tenant: &Tenant, force: bool) -> SendTenantRemindersUseCase {
        SendTenantRemindersUseCase {
            tenant_id: tenant.id.clone(),
            force,
        }
    }

    #[tokio::test]
    async fn it_sends_reminder_and_records_ledger() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        seed_template(
            &ctx,
            &tenant,
            ReminderKind::D3,
            "Olá {cliente_nome}, {valor} vence em {data_vencimento}",
        )
        .await;
        let benefit = seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+5511999990000")).await;

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.processed, 1);
        assert_eq!(res.sent, 1);
        assert_eq!(res.errors, 0);
        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+5511999990000");
        assert_eq!(sent[0].1, "Olá Ana, 42.50 vence em 13/08/2026");

        let entries = ctx
            .repos
            .dispatch_log
            .find_by_benefit(&benefit.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, DispatchOutcome::Sent);
        assert_eq!(entries[0].kind, ReminderKind::D3);
    }

    #[tokio::test]
    async fn second_run_writes_nothing_new() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        let benefit = seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        let first = execute(usecase(&tenant, true), &ctx).await.unwrap();
        assert_eq!(first.sent, 1);

        let second = execute(usecase(&tenant, true), &ctx).await.unwrap();
        assert_eq!(second.processed, 1);
        assert_eq!(second.sent, 0);
        assert_eq!(second.errors, 0);

        assert_eq!(sender.sent().len(), 1);
        let entries = ctx
            .repos
            .dispatch_log
            .find_by_benefit(&benefit.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn it_skips_day_counts_without_a_bucket() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        for kind in &ReminderKind::all() {
            seed_template(&ctx, &tenant, *kind, "vence").await;
        }
        // 6, 4 and 1 days remaining: no bucket, no ledger entry, not counted
        let b6 = seed_benefit(&ctx, &tenant, date(2026, 8, 16), Some("+551100")).await;
        let b4 = seed_benefit(&ctx, &tenant, date(2026, 8, 14), Some("+551100")).await;
        let b1 = seed_benefit(&ctx, &tenant, date(2026, 8, 11), Some("+551100")).await;

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.processed, 0);
        assert_eq!(res.sent, 0);
        assert!(sender.sent().is_empty());
        for benefit in &[b6, b4, b1] {
            assert!(ctx
                .repos
                .dispatch_log
                .find_by_benefit(&benefit.id)
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[tokio::test]
    async fn it_processes_every_bucket() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        for kind in &ReminderKind::all() {
            seed_template(&ctx, &tenant, *kind, "faltam {dias_restantes} dias").await;
        }
        for days in &[7, 5, 3, 2, 0] {
            seed_benefit(&ctx, &tenant, today + chrono::Duration::days(*days), Some("+551100"))
                .await;
        }

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.processed, 5);
        assert_eq!(res.sent, 5);
        let texts: Vec<_> = sender.sent().into_iter().map(|(_, text)| text).collect();
        assert!(texts.contains(&"faltam 0 dias".to_string()));
        assert!(texts.contains(&"faltam 7 dias".to_string()));
    }

    #[tokio::test]
    async fn it_skips_disabled_tenant() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let mut settings = enabled_settings();
        settings.enabled = false;
        let tenant = seed_tenant(&ctx, settings).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        // The enabled flag is respected even in force mode
        for force in &[false, true] {
            let res = execute(usecase(&tenant, *force), &ctx).await.unwrap();
            assert!(res.skipped_disabled);
            assert_eq!(res.processed, 0);
        }
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn it_skips_run_outside_schedule_window() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        // Tenant-local hour is 10, configured send hour is 9
        let ctx = test_ctx(local_millis(today, 10, 0), sender.clone());
        let mut settings = enabled_settings();
        settings.send_hour = Some(9);
        let tenant = seed_tenant(&ctx, settings).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        let benefit = seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        let res = execute(usecase(&tenant, false), &ctx).await.unwrap();

        assert!(res.skipped_out_of_window);
        assert_eq!(res.processed, 0);
        assert!(sender.sent().is_empty());
        assert!(ctx
            .repos
            .dispatch_log
            .find_by_benefit(&benefit.id)
            .await
            .unwrap()
            .is_empty());

        // force bypasses the window
        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();
        assert_eq!(res.sent, 1);
    }

    #[tokio::test]
    async fn it_sends_inside_schedule_window() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 9, 3), sender.clone());
        let mut settings = enabled_settings();
        settings.send_hour = Some(9);
        settings.send_minute = Some(0);
        let tenant = seed_tenant(&ctx, settings).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        let res = execute(usecase(&tenant, false), &ctx).await.unwrap();
        assert!(!res.skipped_out_of_window);
        assert_eq!(res.sent, 1);
    }

    #[tokio::test]
    async fn missing_phone_is_recorded_as_failed_without_sending() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        let benefit = seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("")).await;

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.processed, 1);
        assert_eq!(res.sent, 0);
        assert_eq!(res.errors, 1);
        assert!(sender.sent().is_empty());

        let entries = ctx
            .repos
            .dispatch_log
            .find_by_benefit(&benefit.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, DispatchOutcome::Failed);
        assert!(entries[0].error.as_ref().unwrap().contains("phone"));
    }

    #[tokio::test]
    async fn channel_failure_is_recorded_as_failed() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::failing("gateway rejected the message"));
        let ctx = test_ctx(local_millis(today, 12, 0), sender);
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        let benefit = seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.processed, 1);
        assert_eq!(res.sent, 0);
        assert_eq!(res.errors, 1);

        let entries = ctx
            .repos
            .dispatch_log
            .find_by_benefit(&benefit.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, DispatchOutcome::Failed);
        assert!(entries[0]
            .error
            .as_ref()
            .unwrap()
            .contains("gateway rejected"));
    }

    #[tokio::test]
    async fn no_active_templates_means_zero_work() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res, TenantRunResult::default());
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn candidate_without_template_for_its_bucket_is_skipped() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let tenant = seed_tenant(&ctx, enabled_settings()).await;
        seed_template(&ctx, &tenant, ReminderKind::D7, "vence").await;
        // Expires in 3 days but only a d7 template exists
        let benefit = seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;

        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.processed, 0);
        assert!(sender.sent().is_empty());
        assert!(ctx
            .repos
            .dispatch_log
            .find_by_benefit(&benefit.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn throttle_delay_applies_between_sends_but_not_after_the_last() {
        let today = date(2026, 8, 10);
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(local_millis(today, 12, 0), sender.clone());
        let mut settings = enabled_settings();
        settings.delay_min_secs = 2;
        settings.delay_max_secs = 2;
        let tenant = seed_tenant(&ctx, settings).await;
        seed_template(&ctx, &tenant, ReminderKind::D3, "vence").await;
        for _ in 0..3 {
            seed_benefit(&ctx, &tenant, date(2026, 8, 13), Some("+551100")).await;
        }

        let start = tokio::time::Instant::now();
        let res = execute(usecase(&tenant, true), &ctx).await.unwrap();

        assert_eq!(res.sent, 3);
        // 3 sends, exactly 2 delays of 2s each: none after the final send
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn unknown_tenant_is_an_error() {
        let sender = Arc::new(RecordingSender::default());
        let ctx = test_ctx(0, sender);
        let usecase = SendTenantRemindersUseCase {
            tenant_id: ID::new(),
            force: true,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::TenantNotFound(_))
        ));
    }
}
