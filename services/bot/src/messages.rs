//! User-facing copy and LINE message payloads
//!
//! All outbound messages are built here as `serde_json::Value` bodies for
//! the LINE Messaging API: plain text, quick replies for the registration
//! prompts, confirm templates, and the flex messages for inventory lists
//! and expiry notifications.

use chrono::NaiveDate;
use serde_json::{Value, json};

use common::dates;
use common::models::{Category, ItemDraft, StockItem};

use crate::actions::PostbackAction;

pub const WELCOME: &str = "防災備蓄管理Botへようこそ！\n\nこのBotでは、防災備蓄用食品の賞味期限を管理できます。\n\n📋 主な機能：\n・食品の登録\n・賞味期限の通知\n・食品一覧の表示\n・数量の管理\n\nリッチメニューから操作を選択してください。";

pub const HELP: &str = "【使い方】\n\n📝 食品を登録する\nリッチメニューの「登録」ボタンから、食品の情報を入力してください。\n\n📋 一覧を見る\nリッチメニューの「一覧」ボタンで、登録済みの食品を確認できます。\n\n🔔 通知について\n毎週日曜日の朝9時に、賞味期限が近い食品を通知します。\n（30日前、7日前、当日）\n\nご不明な点がありましたら、お気軽にお問い合わせください。";

pub const MENU_PROMPT: &str = "リッチメニューから操作を選択してください。";
pub const UNKNOWN_ACTION: &str = "不明な操作です。";
pub const ITEM_NOT_FOUND: &str = "食品が見つかりませんでした。";

pub const REGISTER_START: &str = "カテゴリを選択してください：";
pub const REGISTER_NAME: &str = "食品名を入力してください：";
pub const REGISTER_QUANTITY: &str = "数量を入力してください：";
pub const REGISTER_EXPIRY: &str = "賞味期限を入力してください（例: 2026-12-31）：";
pub const REGISTER_SUCCESS: &str = "食品を登録しました！";
pub const REGISTER_CANCEL: &str = "登録をキャンセルしました。";

pub const ERROR_INVALID_CATEGORY: &str = "正しいカテゴリを選択してください。";
pub const ERROR_INVALID_DATE: &str =
    "日付の形式が正しくありません。YYYY-MM-DD形式で入力してください（例: 2026-12-31）";
pub const ERROR_PAST_DATE: &str = "賞味期限は今日以降の日付を入力してください。";
pub const ERROR_INVALID_QUANTITY: &str = "数量は1以上の整数を入力してください。";
pub const ERROR_EMPTY_NAME: &str = "食品名を入力してください。";
pub const ERROR_GENERAL: &str = "一時的なエラーが発生しました。しばらくしてから再度お試しください。";

pub const LIST_EMPTY: &str = "登録されている食品はありません。";
pub const LIST_TITLE: &str = "📋 備蓄食品一覧";

pub const UPDATE_SUCCESS: &str = "数量を更新しました。";
pub const UPDATE_DELETED: &str = "在庫が0になったため、食品を削除しました。";
pub const DELETE_SUCCESS: &str = "食品を削除しました。";

/// A plain text message
pub fn text(text: &str) -> Value {
    json!({
        "type": "text",
        "text": text,
    })
}

/// Category prompt with one quick-reply button per category
pub fn category_quick_reply() -> Value {
    let items: Vec<Value> = Category::ALL
        .iter()
        .map(|category| {
            json!({
                "type": "action",
                "action": {
                    "type": "message",
                    "label": format!("{} {}", category_emoji(*category), category.label()),
                    "text": category.as_str(),
                },
            })
        })
        .collect();

    json!({
        "type": "text",
        "text": REGISTER_START,
        "quickReply": { "items": items },
    })
}

fn category_emoji(category: Category) -> &'static str {
    match category {
        Category::Water => "💧",
        Category::Staple => "🍚",
        Category::Dish => "🥫",
        Category::Snack => "🍪",
        Category::Other => "📦",
    }
}

/// Quantity prompt with common quantities as quick replies
pub fn quantity_quick_reply() -> Value {
    let items: Vec<Value> = ["1", "2", "3", "5", "10"]
        .iter()
        .map(|quantity| {
            json!({
                "type": "action",
                "action": {
                    "type": "message",
                    "label": format!("{}個", quantity),
                    "text": quantity,
                },
            })
        })
        .collect();

    json!({
        "type": "text",
        "text": REGISTER_QUANTITY,
        "quickReply": { "items": items },
    })
}

/// A confirm template with OK/cancel postback buttons
pub fn confirm_template(text: &str, ok: &PostbackAction, cancel: &PostbackAction) -> Value {
    json!({
        "type": "template",
        "altText": text,
        "template": {
            "type": "confirm",
            "text": text,
            "actions": [
                {
                    "type": "postback",
                    "label": "✅ OK",
                    "data": ok.encode(),
                },
                {
                    "type": "postback",
                    "label": "❌ キャンセル",
                    "data": cancel.encode(),
                },
            ],
        },
    })
}

/// Summary text shown before confirming a registration
pub fn registration_summary(draft: &ItemDraft) -> String {
    format!(
        "以下の内容で登録しますか？\n\n食品名: {}\nカテゴリ: {}\n数量: {}個\n賞味期限: {}",
        draft.name,
        draft.category.label(),
        draft.quantity,
        dates::format_japanese(draft.expiry_date),
    )
}

/// Confirmation question for a direct delete
pub fn delete_confirm_text(item_name: &str) -> String {
    format!("「{}」を削除しますか？", item_name)
}

/// Flex message listing a user's items with consume/delete buttons
///
/// Callers are expected to pass items already sorted by expiry date.
pub fn item_list_flex(items: &[StockItem], today: NaiveDate) -> Value {
    let mut contents = vec![json!({
        "type": "text",
        "text": LIST_TITLE,
        "weight": "bold",
        "size": "lg",
    })];

    for item in items {
        let days = dates::days_until_expiry(item.expiry_date, today);
        contents.push(json!({
            "type": "separator",
            "margin": "md",
        }));
        contents.push(json!({
            "type": "box",
            "layout": "vertical",
            "margin": "md",
            "contents": [
                {
                    "type": "text",
                    "text": format!("{}（{}）", item.name, item.category.label()),
                    "weight": "bold",
                    "wrap": true,
                },
                {
                    "type": "text",
                    "text": format!(
                        "数量: {}個 / 賞味期限: {}（{}）",
                        item.quantity,
                        dates::format_japanese(item.expiry_date),
                        dates::remaining_label(days),
                    ),
                    "size": "sm",
                    "color": if days < 0 { "#d32f2f" } else { "#666666" },
                    "wrap": true,
                },
                {
                    "type": "box",
                    "layout": "horizontal",
                    "spacing": "sm",
                    "contents": [
                        {
                            "type": "button",
                            "style": "primary",
                            "height": "sm",
                            "action": {
                                "type": "postback",
                                "label": "1つ消費",
                                "data": PostbackAction::Consume { item_id: item.item_id }.encode(),
                            },
                        },
                        {
                            "type": "button",
                            "style": "secondary",
                            "height": "sm",
                            "action": {
                                "type": "postback",
                                "label": "削除",
                                "data": PostbackAction::Delete { item_id: item.item_id }.encode(),
                            },
                        },
                    ],
                },
            ],
        }));
    }

    json!({
        "type": "flex",
        "altText": LIST_TITLE,
        "contents": {
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": contents,
            },
        },
    })
}

/// Flex message for one user's expiry notification at a given offset
pub fn notification_flex(items: &[StockItem], target_days: i64) -> Value {
    let mut contents = vec![
        json!({
            "type": "text",
            "text": "🔔 賞味期限のお知らせ",
            "weight": "bold",
            "size": "lg",
        }),
        json!({
            "type": "text",
            "text": format!("賞味期限{}の食品があります。", offset_label(target_days)),
            "size": "sm",
            "wrap": true,
        }),
    ];

    for item in items {
        contents.push(json!({
            "type": "text",
            "text": format!(
                "・{}（{}個） {}",
                item.name,
                item.quantity,
                dates::format_japanese(item.expiry_date),
            ),
            "size": "sm",
            "margin": "sm",
            "wrap": true,
        }));
    }

    json!({
        "type": "flex",
        "altText": format!("賞味期限{}の食品があります。", offset_label(target_days)),
        "contents": {
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": contents,
            },
        },
    })
}

/// Notification heading for a day offset (30日前 / 7日前 / 当日)
pub fn offset_label(target_days: i64) -> String {
    if target_days == 0 {
        "当日".to_string()
    } else {
        format!("{}日前", target_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[test]
    fn summary_contains_all_four_fields() {
        let draft = ItemDraft {
            name: "缶詰".to_string(),
            category: Category::Dish,
            quantity: 3,
            expiry_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        };
        let summary = registration_summary(&draft);
        assert!(summary.contains("缶詰"));
        assert!(summary.contains("おかず"));
        assert!(summary.contains("3個"));
        assert!(summary.contains("2026年12月31日"));
    }

    #[test]
    fn confirm_template_carries_both_actions() {
        let message = confirm_template("登録しますか？", &PostbackAction::Confirm, &PostbackAction::Cancel);
        let actions = &message["template"]["actions"];
        assert_eq!(actions[0]["data"], "action=confirm");
        assert_eq!(actions[1]["data"], "action=cancel");
    }

    #[test]
    fn offset_labels() {
        assert_eq!(offset_label(30), "30日前");
        assert_eq!(offset_label(7), "7日前");
        assert_eq!(offset_label(0), "当日");
    }

    #[test]
    fn list_flex_has_one_row_per_item() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let item = StockItem {
            user_id: "U1".to_string(),
            item_id: Uuid::new_v4(),
            name: "水".to_string(),
            category: Category::Water,
            quantity: 6,
            expiry_date: today + Duration::days(30),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let message = item_list_flex(&[item.clone(), item], today);
        let contents = message["contents"]["body"]["contents"].as_array().unwrap();
        // Title plus (separator + row) per item.
        assert_eq!(contents.len(), 1 + 2 * 2);
    }

    #[test]
    fn category_quick_reply_offers_all_five() {
        let message = category_quick_reply();
        let items = message["quickReply"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["action"]["text"], "water");
    }
}
