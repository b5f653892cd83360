//! Inbound webhook event types
//!
//! One delivery carries a batch of zero or more events. Only `message`,
//! `postback`, and `follow` are handled; anything else deserializes to
//! [`WebhookEvent::Unknown`] and is skipped.

use serde::Deserialize;

/// The webhook request body
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One inbound event, discriminated by its `type` tag
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: String,
        source: EventSource,
        message: MessageContent,
    },
    Postback {
        #[serde(rename = "replyToken")]
        reply_token: String,
        source: EventSource,
        postback: PostbackContent,
    },
    Follow {
        #[serde(rename = "replyToken")]
        reply_token: String,
        source: EventSource,
    },
    #[serde(other)]
    Unknown,
}

/// Where an event originated; only user sources carry a user id
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Payload of a message event
#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Payload of a postback event
#[derive(Debug, Clone, Deserialize)]
pub struct PostbackContent {
    pub data: String,
}
