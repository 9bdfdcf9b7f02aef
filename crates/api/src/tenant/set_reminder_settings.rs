use crate::{
    error::FideloError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use fidelo_api_structs::set_reminder_settings::{APIResponse, PathParams, RequestBody};
use fidelo_domain::{ReminderSettings, Tenant, ID};
use fidelo_infra::FideloContext;

pub async fn set_reminder_settings_controller(
    ctx: web::Data<FideloContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, FideloError> {
    let body = body.0;
    let usecase = SetReminderSettingsUseCase {
        tenant_id: path.tenant_id.clone(),
        settings: ReminderSettings {
            enabled: body.enabled,
            send_hour: body.send_hour,
            send_minute: body.send_minute,
            delay_min_secs: body.delay_min_secs,
            delay_max_secs: body.delay_max_secs,
        },
    };
    execute(usecase, &ctx)
        .await
        .map(|tenant| HttpResponse::Ok().json(APIResponse::new(tenant)))
        .map_err(FideloError::from)
}

#[derive(Debug)]
struct SetReminderSettingsUseCase {
    tenant_id: ID,
    settings: ReminderSettings,
}

#[derive(Debug)]
enum UseCaseError {
    TenantNotFound(ID),
    InvalidSettings(String),
    StorageError,
}

impl From<UseCaseError> for FideloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("Tenant with id: {} was not found", tenant_id))
            }
            UseCaseError::InvalidSettings(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetReminderSettingsUseCase {
    type Response = Tenant;

    type Error = UseCaseError;

    const NAME: &'static str = "SetReminderSettings";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        self.settings
            .validate()
            .map_err(|e| UseCaseError::InvalidSettings(e.to_string()))?;

        let mut tenant = ctx
            .repos
            .tenants
            .find(&self.tenant_id)
            .await
            .ok_or_else(|| UseCaseError::TenantNotFound(self.tenant_id.clone()))?;

        tenant.settings.reminders = self.settings.clone();
        ctx.repos
            .tenants
            .save(&tenant)
            .await
            .map(|_| tenant)
            .map_err(|_| UseCaseError::StorageError)
    }
}
