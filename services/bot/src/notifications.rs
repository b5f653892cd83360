//! Notification grouping
//!
//! Partitions an inventory snapshot into per-user batches for one target
//! day-offset. An item is included only when its offset matches exactly:
//! a 29- or 31-day item is not part of the 30-day run, so each item is
//! notified at most once per configured offset, on the day it matches.

use chrono::NaiveDate;
use std::collections::HashMap;

use common::dates;
use common::models::StockItem;

/// Day offsets that trigger a notification, in dispatch order
pub const NOTIFICATION_OFFSETS: [i64; 3] = [30, 7, 0];

/// Group items expiring exactly `target_days` from `today` by owning user
///
/// Users with no matching items are absent from the result.
pub fn group_by_offset(
    items: &[StockItem],
    target_days: i64,
    today: NaiveDate,
) -> HashMap<String, Vec<StockItem>> {
    let mut grouped: HashMap<String, Vec<StockItem>> = HashMap::new();

    for item in items {
        if dates::days_until_expiry(item.expiry_date, today) == target_days {
            grouped
                .entry(item.user_id.clone())
                .or_default()
                .push(item.clone());
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use common::models::Category;
    use uuid::Uuid;

    fn item(user_id: &str, name: &str, expiry: NaiveDate) -> StockItem {
        StockItem {
            user_id: user_id.to_string(),
            item_id: Uuid::new_v4(),
            name: name.to_string(),
            category: Category::Other,
            quantity: 1,
            expiry_date: expiry,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn includes_only_exact_offset_matches() {
        let items = vec![
            item("U1", "at-29", today() + Duration::days(29)),
            item("U1", "at-30", today() + Duration::days(30)),
            item("U1", "at-31", today() + Duration::days(31)),
        ];

        let grouped = group_by_offset(&items, 30, today());
        let batch = grouped.get("U1").unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].name, "at-30");
    }

    #[test]
    fn groups_by_owning_user() {
        let expiry = today() + Duration::days(7);
        let items = vec![
            item("U1", "a", expiry),
            item("U2", "b", expiry),
            item("U1", "c", expiry),
            item("U3", "far", today() + Duration::days(14)),
        ];

        let grouped = group_by_offset(&items, 7, today());
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get("U1").unwrap().len(), 2);
        assert_eq!(grouped.get("U2").unwrap().len(), 1);
        assert!(!grouped.contains_key("U3"));
    }

    #[test]
    fn duplicate_names_are_preserved() {
        let expiry = today();
        let items = vec![item("U1", "水", expiry), item("U1", "水", expiry)];

        let grouped = group_by_offset(&items, 0, today());
        assert_eq!(grouped.get("U1").unwrap().len(), 2);
    }

    #[test]
    fn expired_items_match_negative_offsets_only() {
        let items = vec![item("U1", "old", today() - Duration::days(1))];

        assert!(group_by_offset(&items, 0, today()).is_empty());
        let grouped = group_by_offset(&items, -1, today());
        assert_eq!(grouped.get("U1").unwrap().len(), 1);
    }

    #[test]
    fn empty_snapshot_groups_to_nothing() {
        assert!(group_by_offset(&[], 30, today()).is_empty());
    }
}
