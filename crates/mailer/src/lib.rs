//! # mailer
//!
//! Outbound email for Roving Travel inquiries: an SMTP transport and the
//! dispatcher that sends the customer confirmation and the admin alert.
//!
//! ## Dispatching notifications
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use email_templates::{ContactSnapshot, EmailContentConfig};
//! use mailer::{MailerConfig, NotificationDispatcher, SmtpMailer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailer::MailerError> {
//!     let config = MailerConfig::from_env()?;
//!     let transport = Arc::new(SmtpMailer::new(&config)?);
//!     let dispatcher = NotificationDispatcher::new(transport, config.admin_address());
//!
//!     let contact = ContactSnapshot::sample();
//!     let report = dispatcher.dispatch(&contact, &EmailContentConfig::default()).await;
//!     println!("confirmation sent: {}", report.confirmation.success);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod dispatcher;
mod error;
mod mock;
mod rate;
mod transport;
mod types;

pub use client::SmtpMailer;
pub use config::MailerConfig;
pub use dispatcher::{DeliveryResult, DispatchReport, NotificationDispatcher};
pub use error::MailerError;
pub use mock::{MockMode, MockTransport};
pub use rate::RateLimiter;
pub use transport::MailTransport;
pub use types::Email;
