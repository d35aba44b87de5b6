use chrono::{DateTime, Utc};
use model::presence::PresenceSnapshot;
use std::sync::Arc;

/// Everything the card needs to draw itself, published on every change.
#[derive(Debug, Clone)]
pub struct ControllerState {
    /// Last successfully fetched snapshot. Kept when a later fetch fails.
    pub current_snapshot: Option<Arc<PresenceSnapshot>>,
    pub last_error: Option<String>,
    pub is_fetching: bool,
    pub interval_millis: u64,
    pub auto_refresh_enabled: bool,
    /// When `current_snapshot` was applied
    pub last_updated: Option<DateTime<Utc>>,
}

impl ControllerState {
    pub fn new(interval_millis: u64) -> Self {
        Self {
            current_snapshot: None,
            last_error: None,
            is_fetching: false,
            interval_millis,
            auto_refresh_enabled: true,
            last_updated: None,
        }
    }
}
