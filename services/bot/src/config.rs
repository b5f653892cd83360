//! Service configuration from environment variables

use anyhow::{Context, Result};

/// LINE Messaging API credentials
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Channel access token for outbound reply/push calls
    pub channel_access_token: String,
    /// Channel secret used to verify webhook signatures
    pub channel_secret: String,
}

impl LineConfig {
    /// Create a new LineConfig from environment variables
    ///
    /// # Environment Variables
    /// - `LINE_CHANNEL_ACCESS_TOKEN` (required)
    /// - `LINE_CHANNEL_SECRET` (required)
    pub fn from_env() -> Result<Self> {
        let channel_access_token = std::env::var("LINE_CHANNEL_ACCESS_TOKEN")
            .context("LINE_CHANNEL_ACCESS_TOKEN must be set")?;
        let channel_secret =
            std::env::var("LINE_CHANNEL_SECRET").context("LINE_CHANNEL_SECRET must be set")?;

        Ok(LineConfig {
            channel_access_token,
            channel_secret,
        })
    }
}

/// Bot service settings
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Address the webhook server binds to
    pub bind_addr: String,
    /// Cron expression for the expiry check job
    pub notify_cron: String,
}

impl BotConfig {
    /// Create a new BotConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `NOTIFY_CRON`: expiry check schedule (default: Sundays 09:00)
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let notify_cron =
            std::env::var("NOTIFY_CRON").unwrap_or_else(|_| "0 0 9 * * Sun".to_string());

        Ok(BotConfig {
            bind_addr,
            notify_cron,
        })
    }
}
