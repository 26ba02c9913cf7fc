//! Contact inquiry lifecycle for the Roving Travel back-office.
//!
//! - [`submit_inquiry`] records a public inquiry and sends the two
//!   notification emails.
//! - [`set_status`] moves a contact through its statuses and converts booked
//!   contacts into customers.
//! - [`content`] loads and stores the admin's email content overrides, read
//!   fresh for every send.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use database::Database;
//! use inquiry::{set_status, submit_inquiry, ContactForm};
//! use mailer::{MockTransport, NotificationDispatcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::in_memory().await?;
//! let dispatcher = NotificationDispatcher::new(Arc::new(MockTransport::reachable()), "admin@roving.travel");
//!
//! let form = ContactForm {
//!     full_name: "John Smith".to_string(),
//!     email: "john@example.com".to_string(),
//!     whatsapp: None,
//!     quantity: 2,
//!     date: "2024-12-25".to_string(),
//!     message: None,
//! };
//! let outcome = submit_inquiry(db.pool(), &dispatcher, form).await?;
//!
//! let booked = set_status(db.pool(), outcome.contact.id, "booked").await?;
//! println!("{}", booked.notice().message);
//! # Ok(())
//! # }
//! ```

pub mod content;
mod error;
mod intake;
mod notice;
mod status;

pub use error::{InquiryError, Result};
pub use intake::{snapshot, submit_inquiry, ContactForm, IntakeOutcome};
pub use notice::{Notice, NoticeLevel};
pub use status::{apply_status, can_transition, set_status, StatusOutcome};
