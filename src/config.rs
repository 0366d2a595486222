//! Bot configuration, loaded from environment variables.

use anyhow::{bail, Context, Result};
use std::env;

/// Runtime configuration. Everything comes from the environment (or a `.env`
/// file loaded by the binary before [`BotConfig::load`] runs).
pub struct BotConfig {
    pub bot_token: String,
    pub log_file: String,
    /// Optional Telegram Bot API base URL (point at a mock server in tests).
    /// Env: `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
    /// Webhook mode instead of long polling. Env: `USE_WEBHOOK` in 1/true/yes.
    pub use_webhook: bool,
    pub webhook_base_url: Option<String>,
    pub webhook_path: String,
    pub port: u16,
    /// How many coins the symbol cache covers (listing is market-cap sorted).
    pub listing_limit: u32,
    pub symbol_cache_secs: u64,
}

impl BotConfig {
    /// Loads config from environment. If `token` is provided it overrides
    /// `TELEGRAM_BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN environment variable is required")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/quote-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        let use_webhook = env::var("USE_WEBHOOK")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let webhook_base_url = env::var("WEBHOOK_BASE_URL").ok();
        let webhook_path = env::var("WEBHOOK_PATH").unwrap_or_else(|_| "/api/webhook".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let listing_limit = env::var("CMC_LISTING_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let symbol_cache_secs = env::var("CMC_CACHE_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(600);

        Ok(Self {
            bot_token,
            log_file,
            telegram_api_url,
            use_webhook,
            webhook_base_url,
            webhook_path,
            port,
            listing_limit,
            symbol_cache_secs,
        })
    }

    /// Checks the invariants `load` cannot express field by field.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            bail!("bot token must not be empty");
        }
        if self.use_webhook && self.webhook_base_url.is_none() {
            bail!("WEBHOOK_BASE_URL is required when USE_WEBHOOK is enabled");
        }
        Ok(())
    }

    /// Full webhook URL: base without trailing slash plus the path.
    pub fn webhook_url(&self) -> Result<String> {
        let base = self
            .webhook_base_url
            .as_deref()
            .context("WEBHOOK_BASE_URL is required when USE_WEBHOOK is enabled")?;
        Ok(format!("{}{}", base.trim_end_matches('/'), self.webhook_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "TELEGRAM_BOT_TOKEN",
            "LOG_FILE",
            "TELEGRAM_API_URL",
            "TELOXIDE_API_URL",
            "USE_WEBHOOK",
            "WEBHOOK_BASE_URL",
            "WEBHOOK_PATH",
            "PORT",
            "CMC_LISTING_LIMIT",
            "CMC_CACHE_SECONDS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "test_token");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.log_file, "logs/quote-bot.log");
        assert!(config.telegram_api_url.is_none());
        assert!(!config.use_webhook);
        assert_eq!(config.webhook_path, "/api/webhook");
        assert_eq!(config.port, 8080);
        assert_eq!(config.listing_limit, 5000);
        assert_eq!(config.symbol_cache_secs, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_token_override_beats_env() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "env_token");

        let config = BotConfig::load(Some("cli_token".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli_token");
    }

    #[test]
    #[serial]
    fn test_missing_token_is_an_error() {
        clear_env();
        assert!(BotConfig::load(None).is_err());
    }

    #[test]
    #[serial]
    fn test_webhook_mode_requires_base_url() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
        env::set_var("USE_WEBHOOK", "true");

        let config = BotConfig::load(None).unwrap();
        assert!(config.use_webhook);
        assert!(config.validate().is_err());

        env::set_var("WEBHOOK_BASE_URL", "https://bot.example.com/");
        let config = BotConfig::load(None).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.webhook_url().unwrap(),
            "https://bot.example.com/api/webhook"
        );
    }
}
