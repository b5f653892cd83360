//! Stock item data model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Food category of a stock item
///
/// The wire form is the lowercase English name; matching is exact, with no
/// case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Water,
    Staple,
    Dish,
    Snack,
    Other,
}

impl Category {
    /// All categories, in menu order
    pub const ALL: [Category; 5] = [
        Category::Water,
        Category::Staple,
        Category::Dish,
        Category::Snack,
        Category::Other,
    ];

    /// Wire form of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Staple => "staple",
            Category::Dish => "dish",
            Category::Snack => "snack",
            Category::Other => "other",
        }
    }

    /// Japanese display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Water => "水",
            Category::Staple => "主食",
            Category::Dish => "おかず",
            Category::Snack => "お菓子",
            Category::Other => "その他",
        }
    }

    /// Parse the wire form; returns None for anything but an exact match
    pub fn from_wire(s: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked perishable good, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub user_id: String,
    pub item_id: Uuid,
    pub name: String,
    pub category: Category,
    /// Always >= 1 while the item exists; an item driven to 0 is deleted
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four fields collected by a completed registration flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: Category,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
}
