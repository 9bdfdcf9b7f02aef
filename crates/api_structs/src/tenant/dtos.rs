use chrono::NaiveDate;
use fidelo_domain::{BenefitRecord, MessageTemplate, ReminderKind, ReminderSettings, Tenant, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDTO {
    pub id: ID,
    pub name: String,
    pub reminder_settings: ReminderSettingsDTO,
}

impl TenantDTO {
    pub fn new(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            reminder_settings: ReminderSettingsDTO::new(&tenant.settings.reminders),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsDTO {
    pub enabled: bool,
    pub send_hour: Option<u32>,
    pub send_minute: Option<u32>,
    pub delay_min_secs: u32,
    pub delay_max_secs: u32,
}

impl ReminderSettingsDTO {
    pub fn new(settings: &ReminderSettings) -> Self {
        Self {
            enabled: settings.enabled,
            send_hour: settings.send_hour,
            send_minute: settings.send_minute,
            delay_min_secs: settings.delay_min_secs,
            delay_max_secs: settings.delay_max_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDTO {
    pub id: ID,
    pub tenant_id: ID,
    pub kind: ReminderKind,
    pub body: String,
    pub active: bool,
}

impl TemplateDTO {
    pub fn new(template: &MessageTemplate) -> Self {
        Self {
            id: template.id.clone(),
            tenant_id: template.tenant_id.clone(),
            kind: template.kind,
            body: template.body.clone(),
            active: template.active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitDTO {
    pub id: ID,
    pub tenant_id: ID,
    pub client_id: ID,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub amount: f64,
    pub expires_at: Option<NaiveDate>,
    pub status: String,
}

impl BenefitDTO {
    pub fn new(benefit: &BenefitRecord) -> Self {
        Self {
            id: benefit.id.clone(),
            tenant_id: benefit.tenant_id.clone(),
            client_id: benefit.client_id.clone(),
            client_name: benefit.client_name.clone(),
            client_phone: benefit.client_phone.clone(),
            amount: benefit.amount,
            expires_at: benefit.expires_at,
            status: benefit.status.as_str().to_string(),
        }
    }
}
