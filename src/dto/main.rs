//! DTOs for the operator landing endpoint.

use serde::Serialize;

/// Status rollup shown on the dashboard cards.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}
