//! The transport seam between dispatch logic and mail delivery.

use async_trait::async_trait;

use crate::{Email, MailerError};

/// Something that can deliver an [`Email`].
///
/// Implemented by [`SmtpMailer`](crate::SmtpMailer) for real delivery and by
/// [`MockTransport`](crate::MockTransport) in tests. Object-safe, so it can be
/// shared as `Arc<dyn MailTransport>`.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Check that the server is reachable and accepts our credentials.
    async fn verify(&self) -> Result<(), MailerError>;

    /// Submit one message, returning its `Message-ID`.
    async fn send(&self, email: &Email) -> Result<String, MailerError>;
}

/// Generate a `Message-ID` value in the sender's domain.
pub(crate) fn new_message_id(sender: &str) -> String {
    let domain = sender
        .rsplit_once('@')
        .map(|(_, d)| d)
        .filter(|d| !d.is_empty())
        .unwrap_or("localhost");
    format!("<{}@{}>", uuid::Uuid::new_v4(), domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_uses_sender_domain() {
        let id = new_message_id("bookings@roving.travel");
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@roving.travel>"));
        assert_ne!(id, new_message_id("bookings@roving.travel"));
    }

    #[test]
    fn test_message_id_without_domain() {
        assert!(new_message_id("local").ends_with("@localhost>"));
    }
}
