//! Reqwest-backed gateway implementation.
//!
//! One `reqwest::Client` with a bounded timeout is built at construction and
//! shared by all calls. The base URL stays optional: every call re-checks it
//! and fails with [`GatewayError::Config`] before any socket work when it is
//! absent or malformed. No call is ever retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::ValidateUrl;

use crate::domain::campaign::{Campaign, NewCampaign};
use crate::domain::feed::FeedItem;
use crate::domain::stats::{StatsSummary, StatusCount};
use crate::domain::types::{CampaignId, CampaignStatus};
use crate::gateway::{
    CampaignReader, CampaignWriter, FeedReader, GatewayConfig, GatewayError, GatewayResult,
    StatsReader,
};

/// HTTP gateway for the campaign service.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client, // reqwest::Client is an Arc internally, cheap to clone
    base_url: Option<String>,
}

impl HttpGateway {
    /// Builds the gateway from the supplied configuration.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to build http client: {e}")))?;
        let base_url = config
            .api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> GatewayResult<String> {
        let base = self.base_url.as_deref().ok_or(GatewayError::Config)?;
        if !base.validate_url() {
            return Err(GatewayError::Config);
        }
        Ok(format!("{base}{path}"))
    }

    /// Issues a single request and returns the parsed JSON body.
    ///
    /// An empty body (DELETE success) yields `Value::Null`. Shape validation
    /// beyond syntactic JSON is the caller's job.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> GatewayResult<Value> {
        let url = self.endpoint(path)?;
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Network(format!(
                "unexpected status {status} from {url}"
            )));
        }
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> GatewayResult<T> {
    serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}

fn encode<T: serde::Serialize>(payload: &T) -> GatewayResult<Value> {
    serde_json::to_value(payload).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait]
impl CampaignReader for HttpGateway {
    async fn list_campaigns(&self) -> GatewayResult<Vec<Campaign>> {
        let value = self.request(Method::GET, "/api/campaigns/", None).await?;
        decode(value)
    }

    async fn get_campaign_by_id(&self, id: CampaignId) -> GatewayResult<Campaign> {
        let value = self
            .request(Method::GET, &format!("/api/campaigns/{id}/"), None)
            .await?;
        decode(value)
    }
}

#[async_trait]
impl CampaignWriter for HttpGateway {
    async fn create_campaign(&self, campaign: &NewCampaign) -> GatewayResult<Campaign> {
        let body = encode(campaign)?;
        let value = self
            .request(Method::POST, "/api/campaigns/", Some(&body))
            .await?;
        decode(value)
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        campaign: &NewCampaign,
    ) -> GatewayResult<Campaign> {
        let body = encode(campaign)?;
        let value = self
            .request(Method::PUT, &format!("/api/campaigns/{id}/"), Some(&body))
            .await?;
        decode(value)
    }

    async fn delete_campaign(&self, id: CampaignId) -> GatewayResult<()> {
        self.request(Method::DELETE, &format!("/api/campaigns/{id}/"), None)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StatsReader for HttpGateway {
    async fn fetch_stats(&self) -> GatewayResult<StatsSummary> {
        let value = self.request(Method::GET, "/api/stats/", None).await?;
        decode_stats(value)
    }
}

#[async_trait]
impl FeedReader for HttpGateway {
    async fn fetch_feed(&self) -> GatewayResult<Vec<FeedItem>> {
        let value = self.request(Method::GET, "/api/news/", None).await?;
        decode_feed(value)
    }
}

/// Wire shape of `GET /api/stats/`.
///
/// The aggregate arrives as `{"total": number|null}`; the sum is null when
/// no campaigns exist. Fallbacks for absent fields live here, once, instead
/// of in every consumer.
#[derive(Deserialize)]
struct StatsWire {
    #[serde(default)]
    total_campaigns: u32,
    #[serde(default)]
    total_budget: TotalBudgetWire,
    #[serde(default)]
    status_counts: Vec<StatusCountWire>,
}

#[derive(Deserialize, Default)]
struct TotalBudgetWire {
    #[serde(default)]
    total: Option<f64>,
}

#[derive(Deserialize)]
struct StatusCountWire {
    status: CampaignStatus,
    count: u32,
}

fn decode_stats(value: Value) -> GatewayResult<StatsSummary> {
    let wire: StatsWire = decode(value)?;
    Ok(StatsSummary {
        total_campaigns: wire.total_campaigns,
        total_budget: wire.total_budget.total.unwrap_or(0.0),
        status_counts: wire
            .status_counts
            .into_iter()
            .map(|entry| StatusCount {
                status: entry.status,
                count: entry.count,
            })
            .collect(),
    })
}

/// Wire shape of `GET /api/news/`.
///
/// The upstream feed proxy returns `{"products": [...]}` while older
/// deployments returned the bare list; both are accepted.
// TODO: drop the bare-array fallback once every deployment wraps the items.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedWire {
    Wrapped { products: Vec<FeedItem> },
    Bare(Vec<FeedItem>),
}

fn decode_feed(value: Value) -> GatewayResult<Vec<FeedItem>> {
    let wire: FeedWire = decode(value)?;
    Ok(match wire {
        FeedWire::Wrapped { products } => products,
        FeedWire::Bare(items) => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway(api_url: Option<&str>) -> HttpGateway {
        HttpGateway::new(GatewayConfig {
            api_url: api_url.map(str::to_string),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn unconfigured_base_url_is_a_config_error() {
        let err = gateway(None).endpoint("/api/campaigns/").unwrap_err();
        assert_eq!(err, GatewayError::Config);
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let err = gateway(Some("not a url"))
            .endpoint("/api/campaigns/")
            .unwrap_err();
        assert_eq!(err, GatewayError::Config);
    }

    #[test]
    fn endpoint_joins_without_doubled_slash() {
        let url = gateway(Some("https://api.example.com/"))
            .endpoint("/api/stats/")
            .unwrap();
        assert_eq!(url, "https://api.example.com/api/stats/");
    }

    #[test]
    fn blank_api_url_counts_as_unconfigured() {
        let err = gateway(Some("   ")).endpoint("/api/news/").unwrap_err();
        assert_eq!(err, GatewayError::Config);
    }

    #[test]
    fn stats_decode_defaults_null_budget_to_zero() {
        let summary = decode_stats(json!({
            "total_campaigns": 0,
            "total_budget": {"total": null},
            "status_counts": []
        }))
        .unwrap();
        assert_eq!(summary.total_budget, 0.0);
        assert!(summary.status_counts.is_empty());
    }

    #[test]
    fn stats_decode_preserves_count_order() {
        let summary = decode_stats(json!({
            "total_campaigns": 3,
            "total_budget": {"total": 1500.0},
            "status_counts": [
                {"status": "Paused", "count": 2},
                {"status": "Active", "count": 1}
            ]
        }))
        .unwrap();
        assert_eq!(summary.total_campaigns, 3);
        assert_eq!(summary.status_counts[0].status, CampaignStatus::Paused);
        assert_eq!(summary.status_counts[1].count, 1);
    }

    #[test]
    fn stats_decode_tolerates_missing_fields() {
        let summary = decode_stats(json!({})).unwrap();
        assert_eq!(summary.total_campaigns, 0);
        assert_eq!(summary.total_budget, 0.0);
    }

    #[test]
    fn feed_decode_accepts_wrapped_shape() {
        let items = decode_feed(json!({
            "products": [{"id": 1, "title": "Item", "price": 9.99}]
        }))
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, Some(9.99));
        assert_eq!(items[0].thumbnail, None);
    }

    #[test]
    fn feed_decode_accepts_bare_array() {
        let items = decode_feed(json!([{"id": 2, "title": "Other"}])).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn feed_decode_rejects_unrelated_shapes() {
        assert!(matches!(
            decode_feed(json!({"items": []})).unwrap_err(),
            GatewayError::Decode(_)
        ));
    }
}
