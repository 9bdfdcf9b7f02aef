use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitStatus {
    Available,
    Redeemed,
    Expired,
    Cancelled,
}

impl BenefitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Redeemed => "redeemed",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidBenefitStatusError {
    #[error("Benefit status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for BenefitStatus {
    type Err = InvalidBenefitStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "redeemed" => Ok(Self::Redeemed),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidBenefitStatusError::Unrecognized(s.to_string())),
        }
    }
}

/// A cashback balance belonging to a tenant's client. The dispatch pipeline
/// only reads these rows; redemption and expiration are handled elsewhere.
#[derive(Debug, Clone)]
pub struct BenefitRecord {
    pub id: ID,
    pub tenant_id: ID,
    pub client_id: ID,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_tax_id: Option<String>,
    pub amount: f64,
    pub expires_at: Option<NaiveDate>,
    pub status: BenefitStatus,
}

impl BenefitRecord {
    /// A reminder candidate is an available benefit with a known expiration.
    pub fn is_reminder_candidate(&self) -> bool {
        self.status == BenefitStatus::Available && self.expires_at.is_some()
    }
}

impl Entity for BenefitRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}
