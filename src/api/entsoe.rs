//! [ENTSO-E Transparency Platform](https://transparency.entsoe.eu) client.

pub mod document;

use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};

use crate::prelude::*;

pub const DEFAULT_BASE_URL: &str = "https://web-api.tp.entsoe.eu/api";

/// Day-ahead prices.
const DOCUMENT_TYPE: &str = "A44";

#[derive(Clone, Builder)]
pub struct Config {
    /// Security token issued by the Transparency Platform.
    #[builder(into)]
    pub api_token: String,

    /// EIC code of the bidding zone, used for both `in_Domain` and `out_Domain`.
    #[builder(into)]
    pub zone_id: String,

    #[builder(default = Duration::from_secs(10))]
    pub timeout: Duration,

    pub base_url: Url,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to call the API")]
    Transport(#[source] reqwest::Error),

    #[error("the API responded with `{0}`")]
    Status(StatusCode),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        // The URL carries the security token.
        Self::Transport(error.without_url())
    }
}

/// Source of raw market documents, one per calendar day.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn get_document(&self, on: NaiveDate) -> Result<String, FetchError>;
}

pub struct Api {
    client: Client,
    config: Config,
}

impl Api {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl DocumentSource for Api {
    /// Get the day-ahead price document covering the specified UTC day.
    #[instrument(skip_all, fields(on = %on, zone_id = %self.config.zone_id))]
    async fn get_document(&self, on: NaiveDate) -> Result<String, FetchError> {
        let (period_start, period_end) = day_bounds(on);
        info!(%period_start, %period_end, "fetching…");
        let response = self
            .client
            .get(self.config.base_url.clone())
            .query(&[
                ("securityToken", self.config.api_token.as_str()),
                ("documentType", DOCUMENT_TYPE),
                ("in_Domain", self.config.zone_id.as_str()),
                ("out_Domain", self.config.zone_id.as_str()),
                ("periodStart", period_start.as_str()),
                ("periodEnd", period_end.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "request failed");
            return Err(FetchError::Status(status));
        }
        let body = response.text().await?;
        info!(len = body.len(), "fetched");
        Ok(body)
    }
}

/// Query period for the whole UTC day, in the API's `yyyyMMddHHmm` format.
fn day_bounds(on: NaiveDate) -> (String, String) {
    (on.format("%Y%m%d0000").to_string(), on.format("%Y%m%d2359").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_day_bounds() {
        let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(start, "202403090000");
        assert_eq!(end, "202403092359");
    }

    #[test]
    fn test_config_builder_default_timeout() -> Result {
        let config = Config::builder()
            .api_token("token")
            .zone_id("10YBE----------2")
            .base_url(Url::parse(DEFAULT_BASE_URL)?)
            .build();
        assert_eq!(config.timeout, Duration::from_secs(10));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_get_document_ok() -> Result {
        let config = Config::builder()
            .api_token(std::env::var("ENTSOE_API_TOKEN")?)
            .zone_id("10YBE----------2")
            .base_url(Url::parse(DEFAULT_BASE_URL)?)
            .build();
        let document = Api::new(config)?.get_document(Utc::now().date_naive()).await?;
        assert!(!document.is_empty());
        Ok(())
    }
}
