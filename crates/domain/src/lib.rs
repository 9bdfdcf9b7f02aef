mod benefit;
mod date;
mod dispatch;
mod render;
mod shared;
mod template;
mod tenant;

pub use benefit::{BenefitRecord, BenefitStatus, InvalidBenefitStatusError};
pub use date::{days_until, format_day_month_year};
pub use dispatch::{DispatchLogEntry, DispatchOutcome, DispatchSummary, TenantRunResult};
pub use render::{reminder_vars, render_template};
pub use shared::entity::{Entity, ID};
pub use template::{InvalidReminderKindError, MessageTemplate, ReminderKind};
pub use tenant::{InvalidReminderSettings, ReminderSettings, Tenant, TenantSettings};
