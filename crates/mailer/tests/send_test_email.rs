//! Integration test for sending email through a real SMTP account.
//!
//! Prerequisites:
//! 1. A reachable SMTP submission server
//! 2. Environment variables set:
//!    - SMTP_HOST / SMTP_PORT
//!    - SMTP_USERNAME
//!    - SMTP_PASSWORD
//!
//! Run with:
//! ```bash
//! cargo test -p mailer --test send_test_email -- --ignored
//! ```

use std::sync::Arc;
use std::time::Duration;

use email_templates::{EmailContentConfig, EmailKind};
use mailer::{Email, MailTransport, MailerConfig, MailerError, NotificationDispatcher, SmtpMailer};

/// Send a plain email to the account itself.
#[tokio::test]
#[ignore = "requires a reachable SMTP server and valid credentials"]
async fn test_send_simple_email() -> Result<(), MailerError> {
    let _ = dotenvy::dotenv();

    let config = MailerConfig::from_env()?;
    let recipient = config.username.clone();
    let mailer = SmtpMailer::new(&config)?;

    mailer.verify().await?;
    let email = Email::new(
        "Roving Travel",
        &recipient,
        "mailer test email",
        "This is a test email sent from the mailer integration test.",
    );

    let message_id = mailer.send(&email).await?;
    println!("✓ Test email {} sent to {}", message_id, recipient);

    Ok(())
}

/// Send both rendered test emails through the dispatcher.
#[tokio::test]
#[ignore = "requires a reachable SMTP server and valid credentials"]
async fn test_send_rendered_test_emails() -> Result<(), MailerError> {
    let _ = dotenvy::dotenv();

    let config = MailerConfig::from_env()?;
    let recipient = config.username.clone();
    let dispatcher = NotificationDispatcher::new(Arc::new(SmtpMailer::new(&config)?), config.admin_address());

    for kind in EmailKind::ALL {
        let result = dispatcher
            .send_test(kind, &recipient, &EmailContentConfig::default())
            .await;
        assert!(result.success, "{kind}: {:?}", result.error);
    }

    Ok(())
}

/// An unreachable server fails within the configured timeouts.
#[tokio::test]
async fn test_unreachable_server_fails_fast() {
    // Port 9 (discard) on localhost is normally closed.
    let config = MailerConfig::new("127.0.0.1", 9, "bookings@roving.travel", "secret").with_timeouts(
        Duration::from_secs(1),
        Duration::from_secs(1),
        Duration::from_secs(1),
    );
    let mailer = SmtpMailer::new(&config).expect("transport should build");

    let started = std::time::Instant::now();
    let result = mailer.verify().await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(5));
}

/// Test config loading from environment.
#[test]
fn test_config_from_env() {
    std::env::set_var("SMTP_USERNAME", "bookings@roving.travel");
    std::env::set_var("SMTP_PASSWORD", "test-password");
    std::env::set_var("SMTP_HOST", "smtp.roving.travel");
    std::env::set_var("SMTP_PORT", "2525");
    std::env::set_var("SMTP_RATE_LIMIT", "3");

    let config = MailerConfig::from_env().expect("should load config");

    assert_eq!(config.smtp_host, "smtp.roving.travel");
    assert_eq!(config.smtp_port, 2525);
    assert_eq!(config.username, "bookings@roving.travel");
    assert_eq!(config.rate_limit, 3);

    std::env::remove_var("SMTP_HOST");
    std::env::remove_var("SMTP_PORT");
    std::env::remove_var("SMTP_RATE_LIMIT");
}
