use crate::dtos::DispatchSummaryDTO;
use fidelo_domain::DispatchSummary;
use serde::{Deserialize, Serialize};

pub mod run_dispatch {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub force: bool,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub summary: DispatchSummaryDTO,
    }

    impl APIResponse {
        pub fn new(summary: DispatchSummary) -> Self {
            Self {
                summary: DispatchSummaryDTO::new(&summary),
            }
        }
    }
}
