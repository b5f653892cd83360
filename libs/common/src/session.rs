//! Per-user conversation sessions
//!
//! Each user has at most one session tracking their progress through the
//! registration flow. The state is a tagged union: every variant carries
//! exactly the draft fields that have been collected at that point, so a
//! later step can never observe a not-yet-collected field.
//!
//! Sessions live behind the [`SessionStore`] trait. The Redis
//! implementation keeps each session under a TTL so a stale draft expires
//! on the backend; the in-memory implementation discards stale drafts
//! lazily on access and is only correct for a single process instance.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::cache::RedisPool;
use crate::error::StoreResult;
use crate::models::{Category, ItemDraft};

/// Inactivity window after which an in-progress draft is discarded
pub const SESSION_TIMEOUT_SECS: u64 = 30 * 60;

/// Position in the registration flow, with the fields collected so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    SelectingCategory,
    EnteringName {
        category: Category,
    },
    EnteringQuantity {
        category: Category,
        name: String,
    },
    EnteringExpiry {
        category: Category,
        name: String,
        quantity: i32,
    },
    Confirming {
        draft: ItemDraft,
    },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}

/// One user's conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub state: SessionState,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// A fresh idle session for the given user
    pub fn idle(user_id: &str) -> Self {
        Session {
            user_id: user_id.to_string(),
            state: SessionState::Idle,
            last_activity: Utc::now(),
        }
    }

    /// Whether the session has been inactive past the timeout
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.last_activity > Duration::seconds(SESSION_TIMEOUT_SECS as i64)
    }
}

/// Keyed store of conversation sessions, total over all user identifiers
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the user's session, returning an idle one if absent or stale.
    /// Absent sessions are not persisted until the first update.
    async fn get(&self, user_id: &str) -> StoreResult<Session>;

    /// Store a new state for the user, refreshing the activity timestamp
    async fn update(&self, user_id: &str, state: SessionState) -> StoreResult<Session>;

    /// Return the user's session to idle, discarding any draft
    async fn reset(&self, user_id: &str) -> StoreResult<Session>;
}

/// Redis-backed session store shared by all process instances
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, user_id: &str) -> StoreResult<Session> {
        match self.pool.read_session(user_id).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Session::idle(user_id)),
        }
    }

    async fn update(&self, user_id: &str, state: SessionState) -> StoreResult<Session> {
        let session = Session {
            user_id: user_id.to_string(),
            state,
            last_activity: Utc::now(),
        };
        let raw = serde_json::to_string(&session)?;
        self.pool
            .write_session(user_id, &raw, SESSION_TIMEOUT_SECS)
            .await?;
        Ok(session)
    }

    async fn reset(&self, user_id: &str) -> StoreResult<Session> {
        self.pool.clear_session(user_id).await?;
        Ok(Session::idle(user_id))
    }
}

/// In-memory session store
///
/// Only correct for a single process instance; stale drafts are discarded
/// lazily on access instead of by a backend TTL.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn insert_raw(&self, session: Session) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.user_id.clone(), session);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: &str) -> StoreResult<Session> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(user_id) {
            Some(session) if session.is_stale(Utc::now()) => {
                sessions.remove(user_id);
                Ok(Session::idle(user_id))
            }
            Some(session) => Ok(session.clone()),
            None => Ok(Session::idle(user_id)),
        }
    }

    async fn update(&self, user_id: &str, state: SessionState) -> StoreResult<Session> {
        let session = Session {
            user_id: user_id.to_string(),
            state,
            last_activity: Utc::now(),
        };
        let mut sessions = self.sessions.lock().await;
        sessions.insert(user_id.to_string(), session.clone());
        Ok(session)
    }

    async fn reset(&self, user_id: &str) -> StoreResult<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(user_id);
        Ok(Session::idle(user_id))
    }
}
