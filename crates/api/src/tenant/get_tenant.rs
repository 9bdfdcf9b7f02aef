use crate::{
    error::FideloError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use fidelo_api_structs::get_tenant::{APIResponse, PathParams};
use fidelo_domain::{Tenant, ID};
use fidelo_infra::FideloContext;

pub async fn get_tenant_controller(
    ctx: web::Data<FideloContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, FideloError> {
    let usecase = GetTenantUseCase {
        tenant_id: path.tenant_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|tenant| HttpResponse::Ok().json(APIResponse::new(tenant)))
        .map_err(FideloError::from)
}

#[derive(Debug)]
struct GetTenantUseCase {
    tenant_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for FideloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(tenant_id) => {
                Self::NotFound(format!("Tenant with id: {} was not found", tenant_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTenantUseCase {
    type Response = Tenant;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTenant";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .tenants
            .find(&self.tenant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.tenant_id.clone()))
    }
}
