//! Controller for the statistics dashboard page.

use crate::domain::stats::StatsSummary;
use crate::gateway::{GatewayError, GatewayResult, StatsReader};

/// View-state of the dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsState {
    Loading,
    Loaded(StatsSummary),
    LoadFailed(GatewayError),
}

/// Chart-ready projection of the status counts, in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<&'static str>,
    pub values: Vec<u32>,
}

/// Fetches the summary projection and derives the status chart.
pub struct DashboardController<G> {
    gateway: G,
    state: StatsState,
    latest_refresh: u64,
}

impl<G: StatsReader> DashboardController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: StatsState::Loading,
            latest_refresh: 0,
        }
    }

    pub fn state(&self) -> &StatsState {
        &self.state
    }

    /// Fetches the stats summary; stale responses are discarded the same way
    /// as in the collection controller.
    pub async fn refresh(&mut self) {
        let issued = self.begin_refresh();
        let result = self.gateway.fetch_stats().await;
        self.apply_refresh(issued, result);
    }

    fn begin_refresh(&mut self) -> u64 {
        self.latest_refresh += 1;
        self.latest_refresh
    }

    fn apply_refresh(&mut self, issued: u64, result: GatewayResult<StatsSummary>) {
        if issued != self.latest_refresh {
            return;
        }
        match result {
            Ok(summary) => self.state = StatsState::Loaded(summary),
            Err(e) => {
                log::error!("Failed to load stats: {e}");
                self.state = StatsState::LoadFailed(e);
            }
        }
    }

    /// Chart series over the status counts.
    ///
    /// `None` until loaded and whenever there are no counts, so the caller
    /// renders a "no data" affordance instead of an empty chart.
    pub fn chart_series(&self) -> Option<ChartSeries> {
        match &self.state {
            StatsState::Loaded(summary) if !summary.status_counts.is_empty() => Some(ChartSeries {
                labels: summary
                    .status_counts
                    .iter()
                    .map(|entry| entry.status.as_str())
                    .collect(),
                values: summary.status_counts.iter().map(|entry| entry.count).collect(),
            }),
            _ => None,
        }
    }
}
