//! Remote data gateway: the only component that talks to the network.
//!
//! Controllers depend on the per-entity reader/writer traits below, never on
//! the concrete [`http::HttpGateway`], so tests can swap in the in-memory
//! [`test::TestGateway`].

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::campaign::{Campaign, NewCampaign};
use crate::domain::feed::FeedItem;
use crate::domain::stats::StatsSummary;
use crate::domain::types::CampaignId;

pub mod http;

/// Failure surfaced by any gateway call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No (or invalid) service base URL is configured. Fatal for the current
    /// page; raised before any network attempt.
    #[error("service endpoint is not configured")]
    Config,
    /// Transport failure, timeout, or a non-success HTTP status. Recoverable
    /// by the user re-triggering the operation; never retried automatically.
    #[error("request failed: {0}")]
    Network(String),
    /// Response body was not valid for the expected shape. Rendered to users
    /// the same way as [`GatewayError::Network`].
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Convenient alias for results returned from gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway settings supplied by the hosting environment.
///
/// A missing `api_url` is not an error at load time; it becomes
/// [`GatewayError::Config`] on first use, identically for every controller.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the campaign service, e.g. `https://api.example.com`.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Upper bound for a single round-trip, surfaced as a network error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Loads settings from `CAMPAIGN_`-prefixed environment variables
    /// (`CAMPAIGN_API_URL`, `CAMPAIGN_TIMEOUT_SECS`).
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CAMPAIGN"))
            .build()?
            .try_deserialize()
    }
}

/// Read operations for campaign entities.
#[async_trait]
pub trait CampaignReader {
    /// Fetch the full campaign collection, in service order.
    async fn list_campaigns(&self) -> GatewayResult<Vec<Campaign>>;
    /// Fetch a single campaign by its identifier.
    async fn get_campaign_by_id(&self, id: CampaignId) -> GatewayResult<Campaign>;
}

/// Write operations for campaign entities.
#[async_trait]
pub trait CampaignWriter {
    /// Create a campaign; the service assigns the identifier.
    async fn create_campaign(&self, campaign: &NewCampaign) -> GatewayResult<Campaign>;
    /// Replace an existing campaign wholesale.
    async fn update_campaign(&self, id: CampaignId, campaign: &NewCampaign)
    -> GatewayResult<Campaign>;
    /// Delete a campaign by its identifier.
    async fn delete_campaign(&self, id: CampaignId) -> GatewayResult<()>;
}

/// Read operation for the dashboard summary projection.
#[async_trait]
pub trait StatsReader {
    async fn fetch_stats(&self) -> GatewayResult<StatsSummary>;
}

/// Read operation for the external insights feed.
#[async_trait]
pub trait FeedReader {
    async fn fetch_feed(&self) -> GatewayResult<Vec<FeedItem>>;
}
