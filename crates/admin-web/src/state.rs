//! Application state shared across handlers.

use database::Database;
use mailer::NotificationDispatcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Sends inquiry notifications and test emails.
    pub dispatcher: NotificationDispatcher,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, dispatcher: NotificationDispatcher) -> Self {
        Self { db, dispatcher }
    }
}
