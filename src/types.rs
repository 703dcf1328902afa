use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response envelope from the MEXC contract API
#[derive(Debug, Clone, Deserialize)]
pub struct FundingRateResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<FundingRateData>,
}

/// Funding rate payload for one contract
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateData {
    pub symbol: String,
    pub funding_rate: f64,
    pub max_funding_rate: f64,
    pub min_funding_rate: f64,
    /// Epoch milliseconds
    pub next_settle_time: i64,
}

/// One fully-populated funding snapshot, built fresh each poll and
/// discarded after the notification step.
#[derive(Debug, Clone)]
pub struct FundingSnapshot {
    pub symbol: String,
    pub funding_rate: f64,
    pub max_funding_rate: f64,
    pub min_funding_rate: f64,
    pub next_settle_time: DateTime<Utc>,
}

impl FundingSnapshot {
    /// Five-line summary sent to both Telegram channels
    pub fn summary(&self) -> String {
        format!(
            "Symbol: {}\n\
             Funding Rate: {:.6}\n\
             Max Funding Rate: {:.6}\n\
             Min Funding Rate: {:.6}\n\
             Next Settlement Time (UTC): {}",
            self.symbol,
            self.funding_rate,
            self.max_funding_rate,
            self.min_funding_rate,
            self.next_settle_time.format("%Y-%m-%d %H:%M:%S"),
        )
    }

    /// The alert channel fires when either the current rate or the rate
    /// floor sits below the threshold.
    pub fn breaches(&self, threshold: f64) -> bool {
        self.min_funding_rate < threshold || self.funding_rate < threshold
    }
}
