use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::config::Config;
use crate::errors::NotifyError;

/// Telegram bot client. Two instances run side by side: the routine
/// channel gets every summary, the alert channel only threshold breaches.
pub struct TelegramClient {
    client: Client,
    url: String,
    chat_id: String,
}

impl TelegramClient {
    /// Client for the routine channel
    pub fn routine(config: &Config) -> Self {
        Self::new(
            config.routine_bot_url(),
            config.chat_id.clone(),
            config.http_timeout,
        )
    }

    /// Client for the alert channel
    pub fn alert(config: &Config) -> Self {
        Self::new(
            config.alert_bot_url(),
            config.chat_id.clone(),
            config.http_timeout,
        )
    }

    fn new(url: String, chat_id: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url,
            chat_id,
        }
    }

    /// Send a message to the bot's chat. Anything other than a 200 comes
    /// back as an error carrying the response body; the caller decides
    /// whether the cycle goes on.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve a single canned HTTP response on an ephemeral port
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn send_succeeds_on_200() {
        let url = serve_once("200 OK", r#"{"ok":true}"#).await;

        let client = TelegramClient::new(url, "12345".to_string(), Duration::from_secs(5));
        client.send("test message").await.unwrap();
    }

    #[tokio::test]
    async fn send_maps_non_200_to_status_error() {
        let url = serve_once(
            "403 Forbidden",
            r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#,
        )
        .await;

        let client = TelegramClient::new(url, "12345".to_string(), Duration::from_secs(5));
        match client.send("test message").await {
            Err(NotifyError::Status { code, body }) => {
                assert_eq!(code, 403);
                assert!(body.contains("Forbidden"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
