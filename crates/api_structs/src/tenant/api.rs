use crate::dtos::{BenefitDTO, TemplateDTO, TenantDTO};
use chrono::NaiveDate;
use fidelo_domain::{BenefitRecord, MessageTemplate, ReminderKind, Tenant, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    pub tenant: TenantDTO,
}

impl TenantResponse {
    pub fn new(tenant: Tenant) -> Self {
        Self {
            tenant: TenantDTO::new(&tenant),
        }
    }
}

pub mod create_tenant {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
    }

    pub type APIResponse = TenantResponse;
}

pub mod get_tenant {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tenant_id: ID,
    }

    pub type APIResponse = TenantResponse;
}

pub mod set_reminder_settings {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tenant_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub enabled: bool,
        pub send_hour: Option<u32>,
        pub send_minute: Option<u32>,
        #[serde(default)]
        pub delay_min_secs: u32,
        #[serde(default)]
        pub delay_max_secs: u32,
    }

    pub type APIResponse = TenantResponse;
}

pub mod set_reminder_template {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tenant_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub kind: ReminderKind,
        pub body: String,
        pub active: Option<bool>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub template: TemplateDTO,
    }

    impl APIResponse {
        pub fn new(template: MessageTemplate) -> Self {
            Self {
                template: TemplateDTO::new(&template),
            }
        }
    }
}

pub mod add_benefit {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tenant_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub client_id: Option<ID>,
        pub client_name: String,
        pub client_phone: Option<String>,
        pub client_tax_id: Option<String>,
        pub amount: f64,
        pub expires_at: Option<NaiveDate>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub benefit: BenefitDTO,
    }

    impl APIResponse {
        pub fn new(benefit: BenefitRecord) -> Self {
            Self {
                benefit: BenefitDTO::new(&benefit),
            }
        }
    }
}
