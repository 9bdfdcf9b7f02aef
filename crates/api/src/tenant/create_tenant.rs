use crate::{
    error::FideloError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use fidelo_api_structs::create_tenant::{APIResponse, RequestBody};
use fidelo_domain::Tenant;
use fidelo_infra::FideloContext;

pub async fn create_tenant_controller(
    ctx: web::Data<FideloContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, FideloError> {
    let usecase = CreateTenantUseCase { name: body.0.name };
    execute(usecase, &ctx)
        .await
        .map(|tenant| HttpResponse::Created().json(APIResponse::new(tenant)))
        .map_err(FideloError::from)
}

#[derive(Debug)]
struct CreateTenantUseCase {
    name: String,
}

#[derive(Debug)]
enum UseCaseError {
    EmptyName,
    StorageError,
}

impl From<UseCaseError> for FideloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::BadClientData("Tenant name cannot be empty".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTenantUseCase {
    type Response = Tenant;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTenant";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        let tenant = Tenant::new(self.name.trim());
        let res = ctx.repos.tenants.insert(&tenant).await;

        res.map(|_| tenant).map_err(|_| UseCaseError::StorageError)
    }
}
