use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub companies_csv: PathBuf,
    pub cache_db: PathBuf,
    pub cache_ttl: Duration,
    /// Absent unless both Telegram credentials are configured.
    pub telegram: Option<TelegramSettings>,
}

impl ServerConfig {
    /// Reads configuration from the environment, applying defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a number")?,
            Err(_) => 8000,
        };
        let companies_csv = std::env::var("COMPANIES_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./companies.csv"));
        let cache_db = std::env::var("CACHE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./jobs_cache.db"));
        let ttl_minutes: u64 = match std::env::var("CACHE_TTL_MINUTES") {
            Ok(raw) => raw.parse().context("CACHE_TTL_MINUTES must be a number")?,
            Err(_) => 60,
        };
        let telegram = match (
            std::env::var("TELEGRAM_TOKEN"),
            std::env::var("TELEGRAM_CHAT_ID"),
        ) {
            (Ok(token), Ok(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramSettings { token, chat_id })
            }
            _ => None,
        };

        Ok(Self {
            port,
            companies_csv,
            cache_db,
            cache_ttl: Duration::from_secs(ttl_minutes * 60),
            telegram,
        })
    }
}
