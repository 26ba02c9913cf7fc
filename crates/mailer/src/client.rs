use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::{authentication::Credentials, PoolConfig},
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, instrument};

use crate::rate::RateLimiter;
use crate::transport::{new_message_id, MailTransport};
use crate::{Email, MailerConfig, MailerError};

/// SMTP client for outbound notification mail.
///
/// Holds a pooled STARTTLS connection capped at one concurrent connection,
/// a fixed-window rate limit, and short timeouts so an unreachable server
/// fails fast.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Address,
    sender: String,
    limiter: RateLimiter,
    verify_timeout: Duration,
    send_timeout: Duration,
}

impl SmtpMailer {
    /// Create a new client with the given configuration.
    ///
    /// No connection is opened until the first `verify` or `send`.
    pub fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let creds = Credentials::new(config.username.clone(), config.password().to_string());

        let from_address: Address = config
            .username
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("From: {}", e)))?;

        let pool = PoolConfig::new().max_size(1).min_idle(0);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailerError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .timeout(Some(config.socket_timeout))
            .pool_config(pool)
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            username = %config.username,
            rate_limit = config.rate_limit,
            rate_window_secs = config.rate_window.as_secs(),
            "Created SMTP mailer"
        );

        Ok(Self {
            transport,
            from_address,
            sender: config.username.clone(),
            limiter: RateLimiter::new(config.rate_limit, config.rate_window),
            verify_timeout: config.connect_timeout + config.greeting_timeout,
            send_timeout: config.connect_timeout + config.greeting_timeout + config.socket_timeout,
        })
    }

    /// Build a lettre Message from our Email type.
    fn build_message(&self, email: &Email, message_id: &str) -> Result<Message, MailerError> {
        let from = Mailbox::new(Some(email.from_name.clone()), self.from_address.clone());

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("To '{}': {}", email.to, e)))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .message_id(Some(message_id.to_string()));

        let message = if let Some(html) = &email.html_body {
            builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(SinglePart::plain(email.body.clone()))
                        .singlepart(SinglePart::html(html.clone())),
                )
                .map_err(|e| MailerError::BuildEmail(e.to_string()))?
        } else {
            builder
                .body(email.body.clone())
                .map_err(|e| MailerError::BuildEmail(e.to_string()))?
        };

        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn verify(&self) -> Result<(), MailerError> {
        match tokio::time::timeout(self.verify_timeout, self.transport.test_connection()).await {
            Err(_) => Err(MailerError::Timeout(self.verify_timeout)),
            Ok(Err(e)) => Err(MailerError::Unreachable(e.to_string())),
            Ok(Ok(false)) => Err(MailerError::Unreachable(
                "server did not accept the connection".to_string(),
            )),
            Ok(Ok(true)) => Ok(()),
        }
    }

    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: &Email) -> Result<String, MailerError> {
        let message_id = new_message_id(&self.sender);
        let message = self.build_message(email, &message_id)?;

        // Only messages that can actually go out count against the budget.
        self.limiter.try_acquire().await?;

        match tokio::time::timeout(self.send_timeout, self.transport.send(message)).await {
            Err(_) => return Err(MailerError::Timeout(self.send_timeout)),
            Ok(Err(e)) => return Err(MailerError::Send(e.to_string())),
            Ok(Ok(_)) => {}
        }

        info!(to = %email.to, message_id = %message_id, "Email sent successfully");
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        let config = MailerConfig::new("127.0.0.1", 587, "bookings@roving.travel", "secret");
        SmtpMailer::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_build_html_message() {
        let mailer = mailer();
        let email = Email::new("Roving Travel", "john@example.com", "Hello", "plain")
            .with_html("<p>html</p>");

        let message = mailer.build_message(&email, "<abc@roving.travel>").unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("Roving Travel"));
        assert!(raw.contains("bookings@roving.travel"));
        assert!(raw.contains("<abc@roving.travel>"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[tokio::test]
    async fn test_build_rejects_bad_recipient() {
        let mailer = mailer();
        let email = Email::new("Roving Travel", "not an address", "Hello", "plain");

        let result = mailer.build_message(&email, "<x@roving.travel>");
        assert!(matches!(result, Err(MailerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_bad_recipient_does_not_use_rate_budget() {
        let config = MailerConfig::new("127.0.0.1", 587, "bookings@roving.travel", "secret")
            .with_rate_limit(1, Duration::from_secs(60));
        let mailer = SmtpMailer::new(&config).unwrap();
        let email = Email::new("Roving Travel", "not an address", "Hello", "plain");

        for _ in 0..3 {
            let result = mailer.send(&email).await;
            assert!(matches!(result, Err(MailerError::InvalidAddress(_))));
        }

        // The single slot in the window is still free.
        assert!(mailer.limiter.try_acquire().await.is_ok());
        assert!(mailer.limiter.try_acquire().await.is_err());
    }

    #[test]
    fn test_new_rejects_bad_sender() {
        let config = MailerConfig::new("127.0.0.1", 587, "no-at-sign", "secret");
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(MailerError::InvalidAddress(_))
        ));
    }
}
