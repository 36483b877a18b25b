use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    /// Ordered list of extension ids to scan.
    pub extension_ids: Vec<String>,
    /// Recency window in days.
    pub check_days: i64,
    /// Daily trigger time, local clock.
    pub check_time: NaiveTime,
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let config = Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN must be set")?,
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID")
                .context("TELEGRAM_CHAT_ID must be set")?,
            extension_ids: parse_extension_ids(
                &env::var("EXTENSION_IDS").context("EXTENSION_IDS must be set")?,
            ),
            check_days: env::var("CHECK_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("CHECK_DAYS must be a valid number of days")?,
            check_time: parse_check_time(
                &env::var("CHECK_TIME").unwrap_or_else(|_| "09:00".to_string()),
            )?,
            min_delay_secs: env::var("MIN_DELAY_SECS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("MIN_DELAY_SECS must be a valid number of seconds")?,
            max_delay_secs: env::var("MAX_DELAY_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("MAX_DELAY_SECS must be a valid number of seconds")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.extension_ids.is_empty() {
            bail!("EXTENSION_IDS must list at least one extension id");
        }
        if self.check_days < 0 {
            bail!("CHECK_DAYS must not be negative");
        }
        if self.min_delay_secs > self.max_delay_secs {
            bail!("MIN_DELAY_SECS must not exceed MAX_DELAY_SECS");
        }
        Ok(())
    }
}

/// Split a comma-separated id list, dropping empty entries.
fn parse_extension_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_check_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .with_context(|| format!("CHECK_TIME must be HH:MM, got {raw:?}"))
}
