use serde_json::{json, Value};

use crate::config::TelegramSettings;
use crate::error::ApiError;

/// Forwards job notifications to the Telegram bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    settings: TelegramSettings,
}

impl TelegramNotifier {
    pub fn new(settings: TelegramSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// Sends one formatted notification and returns the bot API's reply.
    pub async fn send(&self, title: &str, company: &str, url: &str) -> Result<Value, ApiError> {
        let send_url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.settings.token
        );
        let text = format!("🚀 New Job: {title}\n🏢 {company}\n🔗 {url}");

        let response = self
            .client
            .post(send_url)
            .json(&json!({ "chat_id": self.settings.chat_id, "text": text }))
            .send()
            .await
            .map_err(|err| ApiError::Internal(format!("telegram request failed: {err}")))?;

        let ok = response.status().is_success();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Ok(json!({ "ok": ok, "resp": body }))
    }
}
