use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Telegram credentials
    pub bot_token: String,
    pub alert_bot_token: String,
    pub chat_id: String,

    // Contract to watch
    pub symbol: String,

    // Polling
    pub poll_interval: Duration,
    pub alert_threshold: f64,
    pub http_timeout: Duration,

    pub log_level: String,

    // Endpoints
    pub mexc_url: String,
    pub telegram_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            // A missing token is not fatal here: the resulting bot URL fails
            // at request time and the failure shows up in the logs.
            bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            alert_bot_token: env::var("TELEGRAM_ALERT_BOT_TOKEN").unwrap_or_default(),
            chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),

            symbol: env::var("SYMBOL").unwrap_or_else(|_| "MAK_USDT".to_string()),

            poll_interval: Duration::from_secs(
                env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("Invalid POLL_INTERVAL_SECS")?,
            ),
            alert_threshold: env::var("ALERT_THRESHOLD")
                .unwrap_or_else(|_| "-0.0002".to_string())
                .parse()
                .context("Invalid ALERT_THRESHOLD")?,
            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Invalid HTTP_TIMEOUT_SECS")?,
            ),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            mexc_url: env::var("MEXC_API_URL")
                .unwrap_or_else(|_| "https://contract.mexc.com".to_string()),
            telegram_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
        })
    }

    /// Funding rate endpoint for the configured symbol
    pub fn funding_url(&self) -> String {
        format!(
            "{}/api/v1/contract/funding_rate/{}",
            self.mexc_url, self.symbol
        )
    }

    /// sendMessage endpoint for the routine bot
    pub fn routine_bot_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.telegram_url, self.bot_token)
    }

    /// sendMessage endpoint for the alert bot
    pub fn alert_bot_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.telegram_url, self.alert_bot_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            bot_token: String::new(),
            alert_bot_token: "alert-token".to_string(),
            chat_id: "12345".to_string(),
            symbol: "MAK_USDT".to_string(),
            poll_interval: Duration::from_secs(60),
            alert_threshold: -0.0002,
            http_timeout: Duration::from_secs(10),
            log_level: "info".to_string(),
            mexc_url: "https://contract.mexc.com".to_string(),
            telegram_url: "https://api.telegram.org".to_string(),
        }
    }

    #[test]
    fn funding_url_embeds_symbol() {
        assert_eq!(
            base_config().funding_url(),
            "https://contract.mexc.com/api/v1/contract/funding_rate/MAK_USDT"
        );
    }

    #[test]
    fn empty_token_still_yields_send_url() {
        // Missing credentials are not caught at startup; the malformed URL
        // fails at request time instead.
        let config = base_config();
        assert_eq!(
            config.routine_bot_url(),
            "https://api.telegram.org/bot/sendMessage"
        );
        assert_eq!(
            config.alert_bot_url(),
            "https://api.telegram.org/botalert-token/sendMessage"
        );
    }
}
