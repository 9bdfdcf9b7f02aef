use crate::shared::entity::{Entity, ID};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far off the configured send minute a run may be and still
/// fall inside the tenant's schedule window.
const SEND_MINUTE_TOLERANCE: u32 = 5;

/// A `Tenant` acts as a namespace for all other resources and lets multiple
/// loyalty programs use the same instance of this server without interfering
/// with each other.
#[derive(Debug, Clone)]
pub struct Tenant {
    pub id: ID,
    pub name: String,
    pub settings: TenantSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TenantSettings {
    pub reminders: ReminderSettings,
}

/// Per-tenant configuration of the expiring-benefit reminder pipeline.
/// Written by the tenant admin surface and read-only to the dispatch run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub enabled: bool,
    /// Tenant-local hour at which reminders may go out. `None` means any hour.
    pub send_hour: Option<u32>,
    /// Tenant-local minute, only meaningful when `send_hour` is set.
    pub send_minute: Option<u32>,
    /// Lower bound in seconds for the randomized pause between outbound sends.
    pub delay_min_secs: u32,
    /// Upper bound in seconds for the randomized pause between outbound sends.
    pub delay_max_secs: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderSettings {
    #[error("Send hour: {0} is not a valid hour of day")]
    InvalidSendHour(u32),
    #[error("Send minute: {0} is not a valid minute")]
    InvalidSendMinute(u32),
    #[error("Delay bounds are invalid: min {min} is greater than max {max}")]
    InvalidDelayBounds { min: u32, max: u32 },
}

impl ReminderSettings {
    pub fn validate(&self) -> Result<(), InvalidReminderSettings> {
        if let Some(hour) = self.send_hour {
            if hour > 23 {
                return Err(InvalidReminderSettings::InvalidSendHour(hour));
            }
        }
        if let Some(minute) = self.send_minute {
            if minute > 59 {
                return Err(InvalidReminderSettings::InvalidSendMinute(minute));
            }
        }
        if self.delay_min_secs > self.delay_max_secs {
            return Err(InvalidReminderSettings::InvalidDelayBounds {
                min: self.delay_min_secs,
                max: self.delay_max_secs,
            });
        }
        Ok(())
    }

    /// Whether the given tenant-local wall-clock time falls inside the
    /// configured send window. The hour must match exactly: a run that misses
    /// the configured hour skips that day rather than catching up.
    pub fn window_matches<T: Timelike>(&self, local: &T) -> bool {
        let send_hour = match self.send_hour {
            Some(hour) => hour,
            None => return true,
        };
        if local.hour() != send_hour {
            return false;
        }
        match self.send_minute {
            Some(minute) => {
                let diff = (local.minute() as i64 - minute as i64).abs();
                diff <= SEND_MINUTE_TOLERANCE as i64
            }
            None => true,
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            send_hour: None,
            send_minute: None,
            delay_min_secs: 0,
            delay_max_secs: 0,
        }
    }
}

impl Tenant {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            settings: Default::default(),
        }
    }
}

impl Entity for Tenant {
    fn id(&self) -> &ID {
        &self.id
    }
}
