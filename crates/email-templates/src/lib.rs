//! # email-templates
//!
//! Content and rendering for the two notification emails sent when a travel
//! inquiry comes in: the customer confirmation and the admin alert.
//!
//! Rendering starts from hard-coded default content, applies an optional
//! admin override, substitutes `{placeholder}` tokens from the contact, and
//! wraps the result in a self-contained HTML shell.
//!
//! ```
//! use email_templates::{render, ContactSnapshot, EmailKind};
//!
//! let contact = ContactSnapshot {
//!     full_name: "John Smith".to_string(),
//!     email: "john@example.com".to_string(),
//!     quantity: 2,
//!     date: "2024-12-25".to_string(),
//!     ..Default::default()
//! };
//!
//! let email = render(EmailKind::Confirmation, &contact, None);
//! assert_eq!(email.subject, "Thank you for your inquiry, John Smith!");
//! assert!(email.html.contains("No additional message"));
//! ```

mod content;
mod kind;
mod placeholder;
mod render;

pub use content::{ContentOverride, EmailContentConfig, TemplateContent};
pub use kind::{EmailKind, UnknownKind};
pub use placeholder::{escape_html, strip_markup, substitute, ContactSnapshot, Placeholder, Target};
pub use render::{render, render_content, RenderedEmail};

/// Render an email using the override stored in `config` for `kind`.
pub fn render_with_config(
    kind: EmailKind,
    contact: &ContactSnapshot,
    config: &EmailContentConfig,
) -> RenderedEmail {
    render(kind, contact, config.get(kind))
}
