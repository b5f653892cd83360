//! Multi-turn registration flow
//!
//! Drives one user turn through the registration state machine:
//!
//! ```text
//! idle -> selecting_category -> entering_name -> entering_quantity
//!      -> entering_expiry -> confirming -> idle
//! ```
//!
//! Invalid input re-prompts the same state and never advances it. The only
//! transition that writes to the item store is `confirm`; if that write
//! fails the session deliberately stays in `confirming` so the user can
//! retry (the retry is not idempotent — an unacknowledged success followed
//! by a retry can create a duplicate item).

use serde_json::Value;
use tracing::{error, info};

use common::dates;
use common::error::StoreResult;
use common::item_store::ItemStore;
use common::models::ItemDraft;
use common::session::{Session, SessionState, SessionStore};

use crate::actions::PostbackAction;
use crate::messages;
use crate::state::AppState;
use crate::validation::{
    ValidationError, validate_category, validate_expiry, validate_name, validate_quantity,
};

/// Begin (or restart) the registration flow, clearing any prior draft
pub async fn start(state: &AppState, user_id: &str) -> StoreResult<Vec<Value>> {
    state
        .sessions
        .update(user_id, SessionState::SelectingCategory)
        .await?;
    Ok(vec![messages::category_quick_reply()])
}

/// Feed one turn of free-text input to a non-idle session
pub async fn step_text(
    state: &AppState,
    user_id: &str,
    session: &Session,
    text: &str,
) -> StoreResult<Vec<Value>> {
    match &session.state {
        SessionState::SelectingCategory => match validate_category(text) {
            Ok(category) => {
                state
                    .sessions
                    .update(user_id, SessionState::EnteringName { category })
                    .await?;
                Ok(vec![messages::text(messages::REGISTER_NAME)])
            }
            Err(_) => Ok(vec![messages::text(messages::ERROR_INVALID_CATEGORY)]),
        },

        SessionState::EnteringName { category } => match validate_name(text) {
            Ok(name) => {
                state
                    .sessions
                    .update(
                        user_id,
                        SessionState::EnteringQuantity {
                            category: *category,
                            name,
                        },
                    )
                    .await?;
                Ok(vec![messages::quantity_quick_reply()])
            }
            Err(_) => Ok(vec![messages::text(messages::ERROR_EMPTY_NAME)]),
        },

        SessionState::EnteringQuantity { category, name } => match validate_quantity(text) {
            Ok(quantity) => {
                state
                    .sessions
                    .update(
                        user_id,
                        SessionState::EnteringExpiry {
                            category: *category,
                            name: name.clone(),
                            quantity,
                        },
                    )
                    .await?;
                Ok(vec![messages::text(messages::REGISTER_EXPIRY)])
            }
            Err(_) => Ok(vec![messages::text(messages::ERROR_INVALID_QUANTITY)]),
        },

        SessionState::EnteringExpiry {
            category,
            name,
            quantity,
        } => match validate_expiry(text, dates::today()) {
            Ok(expiry_date) => {
                let draft = ItemDraft {
                    name: name.clone(),
                    category: *category,
                    quantity: *quantity,
                    expiry_date,
                };
                let summary = messages::registration_summary(&draft);
                state
                    .sessions
                    .update(user_id, SessionState::Confirming { draft })
                    .await?;
                Ok(vec![messages::confirm_template(
                    &summary,
                    &PostbackAction::Confirm,
                    &PostbackAction::Cancel,
                )])
            }
            Err(ValidationError::PastDate) => {
                Ok(vec![messages::text(messages::ERROR_PAST_DATE)])
            }
            Err(_) => Ok(vec![messages::text(messages::ERROR_INVALID_DATE)]),
        },

        // Confirming only advances via confirm/cancel postbacks; free text
        // (and the idle state, which the caller routes elsewhere) gets the
        // menu prompt.
        SessionState::Confirming { .. } | SessionState::Idle => {
            Ok(vec![messages::text(messages::MENU_PROMPT)])
        }
    }
}

/// Confirm the pending registration, creating the item
///
/// On a store failure the session is left in `confirming` to allow a retry.
pub async fn confirm(state: &AppState, user_id: &str) -> StoreResult<Vec<Value>> {
    let session = state.sessions.get(user_id).await?;

    let SessionState::Confirming { draft } = session.state else {
        return Ok(vec![messages::text(messages::ERROR_GENERAL)]);
    };

    match state.items.create(user_id, &draft).await {
        Ok(item) => {
            info!("Registered item {} for user {}", item.item_id, user_id);
            state.sessions.reset(user_id).await?;
            Ok(vec![messages::text(messages::REGISTER_SUCCESS)])
        }
        Err(e) => {
            error!("Failed to create item for user {}: {}", user_id, e);
            Ok(vec![messages::text(messages::ERROR_GENERAL)])
        }
    }
}

/// Cancel whatever operation is in progress and return to idle
pub async fn cancel(state: &AppState, user_id: &str) -> StoreResult<Vec<Value>> {
    state.sessions.reset(user_id).await?;
    Ok(vec![messages::text(messages::REGISTER_CANCEL)])
}
