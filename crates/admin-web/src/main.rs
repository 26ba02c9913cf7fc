//! Roving Travel back-office server.
//!
//! Accepts public travel inquiries, emails the traveller and the admin, and
//! serves the admin interface for working through contacts.

mod config;
mod error;
mod extract;
mod routes;
mod state;

use std::sync::Arc;

use database::Database;
use mailer::{NotificationDispatcher, SmtpMailer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting admin web server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Mail transport; connectivity is checked per send, not at startup
    let transport = SmtpMailer::new(&config.mailer)?;
    let dispatcher = NotificationDispatcher::new(Arc::new(transport), config.mailer.admin_address());
    info!(
        smtp_host = %config.mailer.smtp_host,
        admin = %dispatcher.admin_address(),
        "Mail transport configured"
    );

    // Build application state
    let state = AppState::new(db, dispatcher);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Admin web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
