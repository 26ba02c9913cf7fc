//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use mailer::{MailerConfig, MailerError};

/// Admin web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Outbound mail account.
    pub mailer: MailerConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8788` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:roving.db?mode=rwc` |
    ///
    /// The `SMTP_*` and `ADMIN_EMAIL` variables are read by
    /// [`MailerConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ADMIN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8788".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:roving.db?mode=rwc".to_string());

        let mailer = MailerConfig::from_env()?;

        Ok(Self {
            addr,
            database_url,
            mailer,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,

    #[error("Mail configuration: {0}")]
    Mailer(#[from] MailerError),
}
