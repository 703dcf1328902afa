use chrono::{TimeZone, Utc};
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::errors::FetchError;
use crate::types::{FundingRateResponse, FundingSnapshot};

/// Polls the MEXC contract API for funding rate snapshots
pub struct FundingMonitor {
    client: Client,
    url: String,
}

impl FundingMonitor {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .tcp_nodelay(true)
            .timeout(config.http_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: config.funding_url(),
        }
    }

    /// Fetch the current funding rate for the configured symbol
    pub async fn fetch_funding_rate(&self) -> Result<FundingSnapshot, FetchError> {
        let body = self.client.get(&self.url).send().await?.text().await?;

        debug!("Funding rate response: {}", body);

        let response: FundingRateResponse = serde_json::from_str(&body)?;

        if !response.success {
            return Err(FetchError::Upstream(body));
        }

        let data = match response.data {
            Some(data) => data,
            None => return Err(FetchError::Upstream(body)),
        };

        let next_settle_time = Utc
            .timestamp_millis_opt(data.next_settle_time)
            .single()
            .ok_or_else(|| {
                FetchError::Upstream(format!(
                    "nextSettleTime out of range: {}",
                    data.next_settle_time
                ))
            })?;

        Ok(FundingSnapshot {
            symbol: data.symbol,
            funding_rate: data.funding_rate,
            max_funding_rate: data.max_funding_rate,
            min_funding_rate: data.min_funding_rate,
            next_settle_time,
        })
    }
}
