use crate::shared::entity::ID;
use crate::template::ReminderKind;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidDispatchOutcomeError {
    #[error("Dispatch outcome: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for DispatchOutcome {
    type Err = InvalidDispatchOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidDispatchOutcomeError::Unrecognized(s.to_string())),
        }
    }
}

/// One row of the send ledger. At most one entry ever exists per
/// (benefit, kind) pair, which is what makes repeated dispatch runs safe:
/// a pair that is already recorded, with either outcome, is never attempted
/// again.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchLogEntry {
    pub benefit_id: ID,
    pub kind: ReminderKind,
    pub outcome: DispatchOutcome,
    pub error: Option<String>,
    /// Millis timestamp at which the outcome was recorded.
    pub sent_at: i64,
}

/// The counters produced by one tenant's dispatch run. Ephemeral: summed by
/// the coordinator and returned to the caller, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantRunResult {
    pub processed: usize,
    pub sent: usize,
    pub errors: usize,
    pub skipped_disabled: bool,
    pub skipped_out_of_window: bool,
}

/// Aggregate over all tenants of one dispatch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchSummary {
    pub processed: usize,
    pub sent: usize,
    pub errors: usize,
}

impl DispatchSummary {
    pub fn absorb(&mut self, res: &TenantRunResult) {
        self.processed += res.processed;
        self.sent += res.sent;
        self.errors += res.errors;
    }
}
