use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The fixed day-before-expiration buckets for which a reminder can exist.
/// A benefit record whose remaining days match none of these is not reminded
/// about in that run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    D7,
    D5,
    D3,
    D2,
    D0,
}

impl ReminderKind {
    pub fn all() -> [ReminderKind; 5] {
        use ReminderKind::*;
        [D7, D5, D3, D2, D0]
    }

    /// The bucket for an exact whole-day count until expiration, if any.
    pub fn from_days_remaining(days: i64) -> Option<Self> {
        match days {
            7 => Some(Self::D7),
            5 => Some(Self::D5),
            3 => Some(Self::D3),
            2 => Some(Self::D2),
            0 => Some(Self::D0),
            _ => None,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::D7 => 7,
            Self::D5 => 5,
            Self::D3 => 3,
            Self::D2 => 2,
            Self::D0 => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D7 => "d7",
            Self::D5 => "d5",
            Self::D3 => "d3",
            Self::D2 => "d2",
            Self::D0 => "d0",
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderKindError {
    #[error("Reminder kind: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for ReminderKind {
    type Err = InvalidReminderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d7" => Ok(Self::D7),
            "d5" => Ok(Self::D5),
            "d3" => Ok(Self::D3),
            "d2" => Ok(Self::D2),
            "d0" => Ok(Self::D0),
            _ => Err(InvalidReminderKindError::Unrecognized(s.to_string())),
        }
    }
}

/// A tenant-authored message body for one `ReminderKind`. Only one active
/// template per (tenant, kind) exists at a time.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub id: ID,
    pub tenant_id: ID,
    pub kind: ReminderKind,
    pub body: String,
    pub active: bool,
}

impl MessageTemplate {
    pub fn new(tenant_id: ID, kind: ReminderKind, body: &str) -> Self {
        Self {
            id: Default::default(),
            tenant_id,
            kind,
            body: body.to_string(),
            active: true,
        }
    }
}

impl Entity for MessageTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}
