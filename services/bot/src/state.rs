//! Shared application state

use std::sync::Arc;

use common::item_store::ItemStore;
use common::session::SessionStore;

use crate::line::Notifier;

/// State shared across webhook handlers and the expiry check
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Channel secret used for webhook signature verification
    pub channel_secret: String,
}
