//! Postback action schema
//!
//! Every button in the bot's messages carries one of these actions in its
//! postback data, encoded as flat `key=value` pairs (e.g.
//! `action=consume&itemId=<uuid>`). This is the single encode/decode pair
//! for that wire form; no call site parses postback data by hand.

use uuid::Uuid;

/// An action requested via a postback button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostbackAction {
    /// Start the registration flow
    Register,
    /// Show the user's inventory
    List,
    /// Show the help text
    Help,
    /// Confirm the pending registration
    Confirm,
    /// Cancel the in-progress operation
    Cancel,
    /// Consume one unit of an item
    Consume { item_id: Uuid },
    /// Ask to delete an item (answered with a confirmation round-trip)
    Delete { item_id: Uuid },
    /// Actually delete an item, after confirmation
    ConfirmDelete { item_id: Uuid },
}

impl PostbackAction {
    /// Encode to the postback data wire form
    pub fn encode(&self) -> String {
        match self {
            PostbackAction::Register => "action=register".to_string(),
            PostbackAction::List => "action=list".to_string(),
            PostbackAction::Help => "action=help".to_string(),
            PostbackAction::Confirm => "action=confirm".to_string(),
            PostbackAction::Cancel => "action=cancel".to_string(),
            PostbackAction::Consume { item_id } => format!("action=consume&itemId={}", item_id),
            PostbackAction::Delete { item_id } => format!("action=delete&itemId={}", item_id),
            PostbackAction::ConfirmDelete { item_id } => {
                format!("action=confirm_delete&itemId={}", item_id)
            }
        }
    }

    /// Decode postback data; None for unknown or malformed input
    pub fn decode(data: &str) -> Option<PostbackAction> {
        let mut action = None;
        let mut item_id = None;

        for pair in data.split('&') {
            let (key, value) = pair.split_once('=')?;
            match key {
                "action" => action = Some(value),
                "itemId" => item_id = Some(Uuid::parse_str(value).ok()?),
                // Unknown parameters are ignored for forward compatibility.
                _ => {}
            }
        }

        match action? {
            "register" => Some(PostbackAction::Register),
            "list" => Some(PostbackAction::List),
            "help" => Some(PostbackAction::Help),
            "confirm" => Some(PostbackAction::Confirm),
            "cancel" => Some(PostbackAction::Cancel),
            "consume" => Some(PostbackAction::Consume { item_id: item_id? }),
            "delete" => Some(PostbackAction::Delete { item_id: item_id? }),
            "confirm_delete" => Some(PostbackAction::ConfirmDelete { item_id: item_id? }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_action() {
        let item_id = Uuid::new_v4();
        let actions = [
            PostbackAction::Register,
            PostbackAction::List,
            PostbackAction::Help,
            PostbackAction::Confirm,
            PostbackAction::Cancel,
            PostbackAction::Consume { item_id },
            PostbackAction::Delete { item_id },
            PostbackAction::ConfirmDelete { item_id },
        ];

        for action in actions {
            let encoded = action.encode();
            assert_eq!(PostbackAction::decode(&encoded), Some(action));
        }
    }

    #[test]
    fn rejects_unknown_actions() {
        assert_eq!(PostbackAction::decode("action=settings"), None);
        assert_eq!(PostbackAction::decode("action="), None);
        assert_eq!(PostbackAction::decode(""), None);
        assert_eq!(PostbackAction::decode("itemId=abc"), None);
    }

    #[test]
    fn rejects_missing_or_malformed_item_id() {
        assert_eq!(PostbackAction::decode("action=consume"), None);
        assert_eq!(PostbackAction::decode("action=consume&itemId=not-a-uuid"), None);
        assert_eq!(PostbackAction::decode("action=delete&itemId"), None);
    }
}
