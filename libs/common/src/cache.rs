//! Redis session backing
//!
//! This module provides the Redis connection used as the backing store for
//! per-user conversation sessions. The key scheme (`session:<user_id>`)
//! and the TTL live here; callers hand over the serialized session payload
//! and a timeout.

use anyhow::Result;
use redis::{AsyncCommands, Client};
use tracing::info;

const SESSION_KEY_PREFIX: &str = "session:";

/// Configuration for Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
}

impl RedisConfig {
    /// Create a new RedisConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> Result<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        Ok(RedisConfig { url })
    }
}

/// Redis connection handle
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
}

fn session_key(user_id: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, user_id)
}

impl RedisPool {
    /// Initialize a new Redis connection handle
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisPool { client })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    /// Store a user's serialized session, expiring after `ttl_seconds`
    pub async fn write_session(
        &self,
        user_id: &str,
        payload: &str,
        ttl_seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set_ex(session_key(user_id), payload, ttl_seconds).await?;
        Ok(())
    }

    /// Fetch a user's serialized session; None once absent or expired
    pub async fn read_session(&self, user_id: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.get_connection().await?;
        let payload: Option<String> = conn.get(session_key(user_id)).await?;
        Ok(payload)
    }

    /// Drop a user's session
    pub async fn clear_session(&self, user_id: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.get_connection().await?;
        let _: u64 = conn.del(session_key(user_id)).await?;
        Ok(())
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keys_are_namespaced_per_user() {
        assert_eq!(session_key("U1"), "session:U1");
        assert_ne!(session_key("U1"), session_key("U2"));
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn test_write_read_clear_session() -> Result<()> {
        let config = RedisConfig::from_env()?;
        let pool = RedisPool::new(&config).await?;

        pool.write_session("U-cache-test", r#"{"state":"idle"}"#, 5).await?;

        let retrieved = pool.read_session("U-cache-test").await?;
        assert_eq!(retrieved, Some(r#"{"state":"idle"}"#.to_string()));

        pool.clear_session("U-cache-test").await?;
        let retrieved = pool.read_session("U-cache-test").await?;
        assert_eq!(retrieved, None);

        Ok(())
    }
}
