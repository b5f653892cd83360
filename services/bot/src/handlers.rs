//! Webhook event handling
//!
//! Routes each inbound event to the registration flow, the inventory
//! commands, or the greeting, and replies via the [`Notifier`]. One turn is
//! processed to completion before the next event in the batch.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;

use common::error::StoreError;
use common::item_store::ItemStore;
use common::session::{SessionState, SessionStore};

use crate::actions::PostbackAction;
use crate::events::WebhookEvent;
use crate::line::Notifier;
use crate::messages;
use crate::registration;
use crate::state::AppState;

/// Handle one inbound event to completion
pub async fn handle_event(state: &AppState, event: WebhookEvent) -> Result<()> {
    match event {
        WebhookEvent::Message {
            reply_token,
            source,
            message,
        } => {
            // Only text messages drive the conversation.
            if message.kind != "text" {
                return Ok(());
            }
            let Some(user_id) = source.user_id else {
                warn!("message event without a user id, skipping");
                return Ok(());
            };
            let text = message.text.unwrap_or_default();
            handle_message(state, &reply_token, &user_id, &text).await
        }
        WebhookEvent::Postback {
            reply_token,
            source,
            postback,
        } => {
            let Some(user_id) = source.user_id else {
                warn!("postback event without a user id, skipping");
                return Ok(());
            };
            handle_postback(state, &reply_token, &user_id, &postback.data).await
        }
        WebhookEvent::Follow { reply_token, .. } => {
            state
                .notifier
                .reply(&reply_token, vec![messages::text(messages::WELCOME)])
                .await
        }
        WebhookEvent::Unknown => {
            debug!("ignoring unhandled event kind");
            Ok(())
        }
    }
}

async fn handle_message(
    state: &AppState,
    reply_token: &str,
    user_id: &str,
    text: &str,
) -> Result<()> {
    let session = state.sessions.get(user_id).await?;

    let replies = match session.state {
        SessionState::Idle => handle_idle_command(state, user_id, text).await?,
        _ => registration::step_text(state, user_id, &session, text).await?,
    };

    state.notifier.reply(reply_token, replies).await
}

/// Top-level command routing for idle users
async fn handle_idle_command(
    state: &AppState,
    user_id: &str,
    text: &str,
) -> Result<Vec<Value>> {
    if text.contains("登録") {
        Ok(registration::start(state, user_id).await?)
    } else if text.contains("一覧") {
        Ok(list_items(state, user_id).await)
    } else if text.contains("ヘルプ") {
        Ok(vec![messages::text(messages::HELP)])
    } else {
        Ok(vec![messages::text(messages::MENU_PROMPT)])
    }
}

async fn handle_postback(
    state: &AppState,
    reply_token: &str,
    user_id: &str,
    data: &str,
) -> Result<()> {
    let replies = match PostbackAction::decode(data) {
        Some(PostbackAction::Register) => registration::start(state, user_id).await?,
        Some(PostbackAction::List) => list_items(state, user_id).await,
        Some(PostbackAction::Help) => vec![messages::text(messages::HELP)],
        Some(PostbackAction::Confirm) => registration::confirm(state, user_id).await?,
        Some(PostbackAction::Cancel) => registration::cancel(state, user_id).await?,
        Some(PostbackAction::Consume { item_id }) => consume_item(state, user_id, item_id).await,
        Some(PostbackAction::Delete { item_id }) => {
            request_delete(state, user_id, item_id).await
        }
        Some(PostbackAction::ConfirmDelete { item_id }) => {
            delete_item(state, user_id, item_id).await
        }
        None => {
            warn!("undecodable postback data from {}: {:?}", user_id, data);
            vec![messages::text(messages::UNKNOWN_ACTION)]
        }
    };

    state.notifier.reply(reply_token, replies).await
}

/// Reply with the user's inventory, soonest expiry first
async fn list_items(state: &AppState, user_id: &str) -> Vec<Value> {
    match state.items.list_for_user(user_id).await {
        Ok(items) if items.is_empty() => vec![messages::text(messages::LIST_EMPTY)],
        Ok(items) => vec![messages::item_list_flex(&items, common::dates::today())],
        Err(e) => {
            error!("Failed to list items for user {}: {}", user_id, e);
            vec![messages::text(messages::ERROR_GENERAL)]
        }
    }
}

/// Consume exactly one unit; quantity reaching 0 deletes the item
async fn consume_item(state: &AppState, user_id: &str, item_id: Uuid) -> Vec<Value> {
    let item = match state.items.get(user_id, item_id).await {
        Ok(Some(item)) => item,
        Ok(None) => return vec![messages::text(messages::ITEM_NOT_FOUND)],
        Err(e) => {
            error!("Failed to fetch item {} for user {}: {}", item_id, user_id, e);
            return vec![messages::text(messages::ERROR_GENERAL)];
        }
    };

    let new_quantity = item.quantity - 1;

    if new_quantity <= 0 {
        match state.items.delete(user_id, item_id).await {
            Ok(()) => vec![messages::text(messages::UPDATE_DELETED)],
            Err(e) => {
                error!("Failed to delete item {} for user {}: {}", item_id, user_id, e);
                vec![messages::text(messages::ERROR_GENERAL)]
            }
        }
    } else {
        match state.items.update_quantity(user_id, item_id, new_quantity).await {
            Ok(_) => vec![messages::text(messages::UPDATE_SUCCESS)],
            Err(e) => {
                error!("Failed to update item {} for user {}: {}", item_id, user_id, e);
                vec![messages::text(messages::ERROR_GENERAL)]
            }
        }
    }
}

/// First leg of the delete round-trip: ask for confirmation
async fn request_delete(state: &AppState, user_id: &str, item_id: Uuid) -> Vec<Value> {
    match state.items.get(user_id, item_id).await {
        Ok(Some(item)) => vec![messages::confirm_template(
            &messages::delete_confirm_text(&item.name),
            &PostbackAction::ConfirmDelete { item_id },
            &PostbackAction::Cancel,
        )],
        Ok(None) => vec![messages::text(messages::ITEM_NOT_FOUND)],
        Err(e) => {
            error!("Failed to fetch item {} for user {}: {}", item_id, user_id, e);
            vec![messages::text(messages::ERROR_GENERAL)]
        }
    }
}

/// Second leg of the delete round-trip: remove the item
async fn delete_item(state: &AppState, user_id: &str, item_id: Uuid) -> Vec<Value> {
    match state.items.delete(user_id, item_id).await {
        Ok(()) => vec![messages::text(messages::DELETE_SUCCESS)],
        Err(StoreError::NotFound) => vec![messages::text(messages::ITEM_NOT_FOUND)],
        Err(e) => {
            error!("Failed to delete item {} for user {}: {}", item_id, user_id, e);
            vec![messages::text(messages::ERROR_GENERAL)]
        }
    }
}
