//! Shared test doubles for the bot integration tests
#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use common::error::{StoreError, StoreResult};
use common::item_store::{ItemStore, MemoryItemStore};
use common::models::{ItemDraft, StockItem};
use common::session::MemorySessionStore;

use bot::events::{EventSource, MessageContent, PostbackContent, WebhookEvent};
use bot::line::Notifier;
use bot::state::AppState;

/// Notifier that records every reply and push instead of delivering
#[derive(Default)]
pub struct RecordingNotifier {
    pub replies: Mutex<Vec<(String, Vec<Value>)>>,
    pub pushes: Mutex<Vec<(String, Vec<Value>)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<()> {
        let mut replies = self.replies.lock().await;
        replies.push((reply_token.to_string(), messages));
        Ok(())
    }

    async fn push(&self, user_id: &str, messages: Vec<Value>) -> Result<()> {
        let mut pushes = self.pushes.lock().await;
        pushes.push((user_id.to_string(), messages));
        Ok(())
    }
}

impl RecordingNotifier {
    /// Text of the single message in the most recent reply
    pub async fn last_reply_text(&self) -> String {
        let replies = self.replies.lock().await;
        let (_, messages) = replies.last().expect("no reply recorded");
        messages
            .last()
            .and_then(|m| m["text"].as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// The single most recent reply message as raw JSON
    pub async fn last_reply_message(&self) -> Value {
        let replies = self.replies.lock().await;
        let (_, messages) = replies.last().expect("no reply recorded");
        messages.last().expect("empty reply").clone()
    }

    pub async fn reply_count(&self) -> usize {
        self.replies.lock().await.len()
    }
}

/// Notifier whose pushes fail for one specific user
pub struct FlakyNotifier {
    pub inner: RecordingNotifier,
    pub failing_user: String,
}

#[async_trait]
impl Notifier for FlakyNotifier {
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<()> {
        self.inner.reply(reply_token, messages).await
    }

    async fn push(&self, user_id: &str, messages: Vec<Value>) -> Result<()> {
        if user_id == self.failing_user {
            return Err(anyhow!("simulated delivery failure"));
        }
        self.inner.push(user_id, messages).await
    }
}

/// Item store whose create always fails; everything else delegates
#[derive(Default)]
pub struct FailingCreateStore {
    pub inner: MemoryItemStore,
}

#[async_trait]
impl ItemStore for FailingCreateStore {
    async fn create(&self, _user_id: &str, _draft: &ItemDraft) -> StoreResult<StockItem> {
        Err(StoreError::Corrupt("simulated create failure".to_string()))
    }

    async fn get(&self, user_id: &str, item_id: Uuid) -> StoreResult<Option<StockItem>> {
        self.inner.get(user_id, item_id).await
    }

    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<StockItem>> {
        self.inner.list_for_user(user_id).await
    }

    async fn update_quantity(
        &self,
        user_id: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> StoreResult<StockItem> {
        self.inner.update_quantity(user_id, item_id, quantity).await
    }

    async fn delete(&self, user_id: &str, item_id: Uuid) -> StoreResult<()> {
        self.inner.delete(user_id, item_id).await
    }

    async fn scan_all(&self) -> StoreResult<Vec<StockItem>> {
        self.inner.scan_all().await
    }
}

/// App state wired to in-memory stores and a recording notifier
pub fn test_state() -> (AppState, Arc<MemoryItemStore>, Arc<RecordingNotifier>) {
    let items = Arc::new(MemoryItemStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState {
        items: items.clone(),
        sessions: Arc::new(MemorySessionStore::new()),
        notifier: notifier.clone(),
        channel_secret: "test-secret".to_string(),
    };
    (state, items, notifier)
}

fn user_source(user_id: &str) -> EventSource {
    EventSource {
        kind: "user".to_string(),
        user_id: Some(user_id.to_string()),
    }
}

/// A text message event from `user_id`
pub fn text_event(user_id: &str, text: &str) -> WebhookEvent {
    WebhookEvent::Message {
        reply_token: "rt".to_string(),
        source: user_source(user_id),
        message: MessageContent {
            kind: "text".to_string(),
            text: Some(text.to_string()),
        },
    }
}

/// A non-text message event (sticker, image, ...)
pub fn sticker_event(user_id: &str) -> WebhookEvent {
    WebhookEvent::Message {
        reply_token: "rt".to_string(),
        source: user_source(user_id),
        message: MessageContent {
            kind: "sticker".to_string(),
            text: None,
        },
    }
}

/// A postback event carrying raw action data
pub fn postback_event(user_id: &str, data: &str) -> WebhookEvent {
    WebhookEvent::Postback {
        reply_token: "rt".to_string(),
        source: user_source(user_id),
        postback: PostbackContent {
            data: data.to_string(),
        },
    }
}

/// A follow event from `user_id`
pub fn follow_event(user_id: &str) -> WebhookEvent {
    WebhookEvent::Follow {
        reply_token: "rt".to_string(),
        source: user_source(user_id),
    }
}
