//! LINE Messaging API client
//!
//! The [`Notifier`] trait is the delivery seam: the turn handler replies to
//! the originating turn, the scheduled expiry check pushes directly to the
//! user. [`LineClient`] is the production implementation.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::LineConfig;

const LINE_API_BASE: &str = "https://api.line.me/v2/bot";

/// Outbound message delivery
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Reply to the turn identified by `reply_token`
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<()>;

    /// Push messages directly to a user, outside any turn
    async fn push(&self, user_id: &str, messages: Vec<Value>) -> Result<()>;
}

/// HTTP client for the LINE Messaging API
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    channel_access_token: String,
}

impl LineClient {
    pub fn new(config: &LineConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            channel_access_token: config.channel_access_token.clone(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<()> {
        let response = self
            .http
            .post(format!("{}{}", LINE_API_BASE, path))
            .bearer_auth(&self.channel_access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("LINE API returned {}: {}", status, detail));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<()> {
        self.post(
            "/message/reply",
            json!({
                "replyToken": reply_token,
                "messages": messages,
            }),
        )
        .await
    }

    async fn push(&self, user_id: &str, messages: Vec<Value>) -> Result<()> {
        self.post(
            "/message/push",
            json!({
                "to": user_id,
                "messages": messages,
            }),
        )
        .await
    }
}
