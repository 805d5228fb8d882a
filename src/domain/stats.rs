use serde::{Deserialize, Serialize};

use crate::domain::types::CampaignStatus;

/// Number of campaigns in a given status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: CampaignStatus,
    pub count: u32,
}

/// Read-only summary projection for the dashboard.
///
/// Derived server-side on each fetch; never persisted locally. The order of
/// `status_counts` is whatever the service returned and is preserved all the
/// way into the chart series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSummary {
    pub total_campaigns: u32,
    pub total_budget: f64,
    pub status_counts: Vec<StatusCount>,
}
