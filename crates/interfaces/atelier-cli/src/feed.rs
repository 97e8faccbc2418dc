use async_trait::async_trait;
use atelier_core::status::StatusObservation;
use atelier_session::{StatusFeed, WatchError};
use serde::Deserialize;
use std::time::Duration;

/// Wire shape of `GET /orders/<id>/status` on the storefront backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: String,
    #[serde(default)]
    assigned_tailor: Option<String>,
    #[serde(default)]
    tracking_number: Option<String>,
    #[serde(default)]
    estimated_delivery: Option<String>,
}

/// Order status feed backed by the storefront's REST API.
pub struct HttpStatusFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatusFeed {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WatchError::Feed(format!("could not build HTTP client: {e}")))?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl StatusFeed for HttpStatusFeed {
    async fn fetch_status(&self, order_id: &str) -> Result<StatusObservation, WatchError> {
        let url = format!("{}/orders/{}/status", self.base_url, order_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WatchError::Feed(format!("request to {url} failed: {e}")))?;
        if !response.status().is_success() {
            return Err(WatchError::Feed(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| WatchError::Feed(format!("undecodable status payload from {url}: {e}")))?;

        Ok(StatusObservation {
            order_id: order_id.to_string(),
            status: body.status,
            assigned_tailor: body.assigned_tailor,
            tracking_number: body.tracking_number,
            estimated_delivery: body.estimated_delivery,
        })
    }
}
