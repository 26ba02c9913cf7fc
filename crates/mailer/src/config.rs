use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::MailerError;

/// Configuration for the outbound SMTP account.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// SMTP host (default: 127.0.0.1)
    pub smtp_host: String,
    /// SMTP submission port (default: 587)
    pub smtp_port: u16,
    /// Account address, also the sender address
    pub username: String,
    /// Account password
    password: SecretString,
    /// Recipient of admin alerts; the account address when unset
    pub admin_email: Option<String>,
    /// Messages allowed per rate window (default: 5)
    pub rate_limit: u32,
    /// Length of the rate window (default: 20s)
    pub rate_window: Duration,
    /// TCP connect timeout (default: 10s)
    pub connect_timeout: Duration,
    /// Wait for the server greeting (default: 5s)
    pub greeting_timeout: Duration,
    /// Socket inactivity timeout (default: 10s)
    pub socket_timeout: Duration,
}

impl MailerConfig {
    pub const DEFAULT_PORT: u16 = 587;
    pub const DEFAULT_RATE_LIMIT: u32 = 5;
    pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(20);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_GREETING_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a new configuration with explicit values.
    pub fn new(
        smtp_host: impl Into<String>,
        smtp_port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            smtp_host: smtp_host.into(),
            smtp_port,
            username: username.into(),
            password: SecretString::from(password.into()),
            admin_email: None,
            rate_limit: Self::DEFAULT_RATE_LIMIT,
            rate_window: Self::DEFAULT_RATE_WINDOW,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            greeting_timeout: Self::DEFAULT_GREETING_TIMEOUT,
            socket_timeout: Self::DEFAULT_SOCKET_TIMEOUT,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `SMTP_USERNAME` - account address (sender)
    /// - `SMTP_PASSWORD` - account password
    ///
    /// Optional (with defaults):
    /// - `SMTP_HOST` - Default: 127.0.0.1
    /// - `SMTP_PORT` - Default: 587
    /// - `ADMIN_EMAIL` - Default: `SMTP_USERNAME`
    /// - `SMTP_RATE_LIMIT` - Default: 5
    /// - `SMTP_RATE_WINDOW_SECS` - Default: 20
    /// - `SMTP_CONNECT_TIMEOUT_SECS` - Default: 10
    /// - `SMTP_GREETING_TIMEOUT_SECS` - Default: 5
    /// - `SMTP_SOCKET_TIMEOUT_SECS` - Default: 10
    pub fn from_env() -> Result<Self, MailerError> {
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let smtp_port = parse_var("SMTP_PORT", Self::DEFAULT_PORT)?;

        let username =
            env::var("SMTP_USERNAME").map_err(|_| MailerError::MissingEnvVar("SMTP_USERNAME".to_string()))?;
        let password =
            env::var("SMTP_PASSWORD").map_err(|_| MailerError::MissingEnvVar("SMTP_PASSWORD".to_string()))?;

        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty());

        let rate_limit = parse_var("SMTP_RATE_LIMIT", Self::DEFAULT_RATE_LIMIT)?;
        if rate_limit == 0 {
            return Err(MailerError::Config("SMTP_RATE_LIMIT must be at least 1".to_string()));
        }

        Ok(Self {
            smtp_host,
            smtp_port,
            username,
            password: SecretString::from(password),
            admin_email,
            rate_limit,
            rate_window: parse_secs("SMTP_RATE_WINDOW_SECS", Self::DEFAULT_RATE_WINDOW)?,
            connect_timeout: parse_secs("SMTP_CONNECT_TIMEOUT_SECS", Self::DEFAULT_CONNECT_TIMEOUT)?,
            greeting_timeout: parse_secs("SMTP_GREETING_TIMEOUT_SECS", Self::DEFAULT_GREETING_TIMEOUT)?,
            socket_timeout: parse_secs("SMTP_SOCKET_TIMEOUT_SECS", Self::DEFAULT_SOCKET_TIMEOUT)?,
        })
    }

    /// Get the password (exposes the secret).
    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Address admin alerts are delivered to.
    pub fn admin_address(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(&self.username)
    }

    /// Builder method to set the admin alert recipient.
    pub fn with_admin_email(mut self, email: impl Into<String>) -> Self {
        self.admin_email = Some(email.into());
        self
    }

    /// Builder method to set the outbound rate budget.
    pub fn with_rate_limit(mut self, limit: u32, window: Duration) -> Self {
        self.rate_limit = limit.max(1);
        self.rate_window = window;
        self
    }

    /// Builder method to set connect, greeting and socket timeouts.
    pub fn with_timeouts(mut self, connect: Duration, greeting: Duration, socket: Duration) -> Self {
        self.connect_timeout = connect;
        self.greeting_timeout = greeting;
        self.socket_timeout = socket;
        self
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, MailerError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| MailerError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn parse_secs(name: &str, default: Duration) -> Result<Duration, MailerError> {
    parse_var(name, default.as_secs()).map(Duration::from_secs)
}
