use crate::{
    error::FideloError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use fidelo_api_structs::add_benefit::{APIResponse, PathParams, RequestBody};
use fidelo_domain::{BenefitRecord, BenefitStatus, ID};
use fidelo_infra::FideloContext;

pub async fn add_benefit_controller(
    ctx: web::Data<FideloContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, FideloError> {
    let body = body.0;
    let usecase = AddBenefitUseCase {
        tenant_id: path.tenant_id.clone(),
        client_id: body.client_id.unwrap_or_default(),
        client_name: body.client_name,
        client_phone: body.client_phone,
        client_tax_id: body.client_tax_id,
        amount: body.amount,
        expires_at: body.expires_at,
    };
    execute(usecase, &ctx)
        .await
        .map(|benefit| HttpResponse::Created().json(APIResponse::new(benefit)))
        .map_err(FideloError::from)
}

#[derive(Debug)]
struct AddBenefitUseCase {
    tenant_id: ID,
    client_id: ID,
    client_name: String,
    client_phone: Option<String>,
    client_tax_id: Option<String>,
    amount: f64,
    expires_at: Option<NaiveDate>,
}

#[derive(Debug)]
enum UseCaseError {
    TenantNotFound(ID),
    InvalidAmount(f64),
    StorageError,
}

impl From<UseCaseError> for FideloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("Tenant with id: {} was not found", tenant_id))
            }
            UseCaseError::InvalidAmount(amount) => {
                Self::BadClientData(format!("Benefit amount: {} is not valid", amount))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddBenefitUseCase {
    type Response = BenefitRecord;

    type Error = UseCaseError;

    const NAME: &'static str = "AddBenefit";

    async fn execute(&mut self, ctx: &FideloContext) -> Result<Self::Response, Self::Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(UseCaseError::InvalidAmount(self.amount));
        }
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }

        let benefit = BenefitRecord {
            id: Default::default(),
            tenant_id: self.tenant_id.clone(),
            client_id: self.client_id.clone(),
            client_name: self.client_name.clone(),
            client_phone: self.client_phone.clone(),
            client_tax_id: self.client_tax_id.clone(),
            amount: self.amount,
            expires_at: self.expires_at,
            status: BenefitStatus::Available,
        };

        ctx.repos
            .benefits
            .insert(&benefit)
            .await
            .map(|_| benefit)
            .map_err(|_| UseCaseError::StorageError)
    }
}
