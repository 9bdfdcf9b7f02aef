use crate::{
    error::FideloError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use fidelo_api_structs::set_reminder_template::{APIResponse, PathParams, RequestBody};
use fidelo_domain::{MessageTemplate, ReminderKind, ID};
use fidelo_infra::FideloContext;

pub async fn set_reminder_template_controller(
    ctx: web::Data<FideloContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, FideloError> {
    let body = body.0;
    let usecase = SetReminderTemplateUseCase {
        tenant_id: path.tenant_id.clone(),
        kind: body.kind,
        body: body.body,
        active: body.active.unwrap_or(true),
    };
    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Ok().json(APIResponse::new(template)))
        .map_err(FideloError::from)
}

#[derive(Debug)]
struct SetReminderTemplateUseCase {
    tenant_id: ID,
    kind: ReminderKind,
    body: String,
    active: bool,
}

#[derive(Debug)]
enum UseCaseError {
    TenantNotFound(ID),
    EmptyBody,
    StorageError,
}

impl From<UseCaseError> for FideloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("Tenant with id: {} was not found", tenant_id))
            }
            UseCaseError::EmptyBody => {
                Self::BadClientData("Template body cannot be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetReminderTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "SetReminderTemplate";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        if self.body.trim().is_empty() {
            return Err(UseCaseError::EmptyBody);
        }
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }

        let mut template = MessageTemplate::new(self.tenant_id.clone(), self.kind, &self.body);
        template.active = self.active;

        ctx.repos
            .templates
            .upsert(&template)
            .await
            .map(|_| template)
            .map_err(|_| UseCaseError::StorageError)
    }
}
