use fidelo_domain::DispatchSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummaryDTO {
    pub processed: usize,
    pub sent: usize,
    pub errors: usize,
}

impl DispatchSummaryDTO {
    pub fn new(summary: &DispatchSummary) -> Self {
        Self {
            processed: summary.processed,
            sent: summary.sent,
            errors: summary.errors,
        }
    }
}
