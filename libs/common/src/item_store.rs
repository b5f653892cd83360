//! Item store: persistence for stock items
//!
//! The store is the narrow seam between the conversation logic and the
//! database. [`PgItemStore`] is the production implementation;
//! [`MemoryItemStore`] backs tests and single-instance development.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Category, ItemDraft, StockItem};

/// Persistence operations for stock items
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Create a new item for the user from a completed draft
    async fn create(&self, user_id: &str, draft: &ItemDraft) -> StoreResult<StockItem>;

    /// Fetch one item; Ok(None) if the user has no such item
    async fn get(&self, user_id: &str, item_id: Uuid) -> StoreResult<Option<StockItem>>;

    /// All of one user's items, soonest expiry first
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<StockItem>>;

    /// Overwrite an item's quantity, refreshing its update timestamp
    async fn update_quantity(
        &self,
        user_id: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> StoreResult<StockItem>;

    /// Remove an item
    async fn delete(&self, user_id: &str, item_id: Uuid) -> StoreResult<()>;

    /// Every item across all users; used only by the scheduled expiry check
    async fn scan_all(&self) -> StoreResult<Vec<StockItem>>;
}

/// PostgreSQL-backed item store over the `stock_items` table
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn item_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<StockItem> {
    let raw_category: String = row.get("category");
    let category = Category::from_wire(&raw_category)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown category: {}", raw_category)))?;

    Ok(StockItem {
        user_id: row.get("user_id"),
        item_id: row.get("item_id"),
        name: row.get("name"),
        category,
        quantity: row.get("quantity"),
        expiry_date: row.get("expiry_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn create(&self, user_id: &str, draft: &ItemDraft) -> StoreResult<StockItem> {
        info!("Creating stock item for user: {}", user_id);

        let row = sqlx::query(
            r#"
            INSERT INTO stock_items (user_id, item_id, name, category, quantity, expiry_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now(), now())
            RETURNING user_id, item_id, name, category, quantity, expiry_date, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .bind(draft.category.as_str())
        .bind(draft.quantity)
        .bind(draft.expiry_date)
        .fetch_one(&self.pool)
        .await?;

        item_from_row(&row)
    }

    async fn get(&self, user_id: &str, item_id: Uuid) -> StoreResult<Option<StockItem>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, item_id, name, category, quantity, expiry_date, created_at, updated_at
            FROM stock_items
            WHERE user_id = $1 AND item_id = $2
            "#,
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(item_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<StockItem>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, item_id, name, category, quantity, expiry_date, created_at, updated_at
            FROM stock_items
            WHERE user_id = $1
            ORDER BY expiry_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }

    async fn update_quantity(
        &self,
        user_id: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> StoreResult<StockItem> {
        let row = sqlx::query(
            r#"
            UPDATE stock_items
            SET quantity = $3, updated_at = now()
            WHERE user_id = $1 AND item_id = $2
            RETURNING user_id, item_id, name, category, quantity, expiry_date, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(item_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => item_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, user_id: &str, item_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM stock_items WHERE user_id = $1 AND item_id = $2")
            .bind(user_id)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn scan_all(&self) -> StoreResult<Vec<StockItem>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, item_id, name, category, quantity, expiry_date, created_at, updated_at
            FROM stock_items
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }
}

/// In-memory item store for tests and single-instance development
#[derive(Default)]
pub struct MemoryItemStore {
    items: tokio::sync::Mutex<Vec<StockItem>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn create(&self, user_id: &str, draft: &ItemDraft) -> StoreResult<StockItem> {
        let now = Utc::now();
        let item = StockItem {
            user_id: user_id.to_string(),
            item_id: Uuid::new_v4(),
            name: draft.name.clone(),
            category: draft.category,
            quantity: draft.quantity,
            expiry_date: draft.expiry_date,
            created_at: now,
            updated_at: now,
        };
        let mut items = self.items.lock().await;
        items.push(item.clone());
        Ok(item)
    }

    async fn get(&self, user_id: &str, item_id: Uuid) -> StoreResult<Option<StockItem>> {
        let items = self.items.lock().await;
        Ok(items
            .iter()
            .find(|i| i.user_id == user_id && i.item_id == item_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<StockItem>> {
        let items = self.items.lock().await;
        let mut owned: Vec<StockItem> = items
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|i| i.expiry_date);
        Ok(owned)
    }

    async fn update_quantity(
        &self,
        user_id: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> StoreResult<StockItem> {
        let mut items = self.items.lock().await;
        let item = items
            .iter_mut()
            .find(|i| i.user_id == user_id && i.item_id == item_id)
            .ok_or(StoreError::NotFound)?;
        item.quantity = quantity;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete(&self, user_id: &str, item_id: Uuid) -> StoreResult<()> {
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|i| !(i.user_id == user_id && i.item_id == item_id));
        if items.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn scan_all(&self) -> StoreResult<Vec<StockItem>> {
        let items = self.items.lock().await;
        Ok(items.clone())
    }
}
