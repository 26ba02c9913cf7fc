use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when delivering mail.
#[derive(Debug, Error)]
pub enum MailerError {
    /// Failed to build SMTP transport
    #[error("SMTP transport error: {0}")]
    Transport(String),

    /// The mail server could not be reached or rejected the login
    #[error("Mail server unreachable: {0}")]
    Unreachable(String),

    /// The server did not answer in time
    #[error("Mail server timed out after {0:?}")]
    Timeout(Duration),

    /// Outbound rate budget for the current window is used up
    #[error("Rate limit exceeded: at most {limit} messages per {window:?}")]
    RateLimited { limit: u32, window: Duration },

    /// Failed to send email
    #[error("Failed to send email: {0}")]
    Send(String),

    /// Failed to build email message
    #[error("Failed to build email: {0}")]
    BuildEmail(String),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}
