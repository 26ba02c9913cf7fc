//! Notification dispatch for new inquiries.

use std::sync::Arc;

use email_templates::{render_with_config, ContactSnapshot, EmailContentConfig, EmailKind};
use serde::Serialize;
use tracing::{info, warn};

use crate::{Email, MailTransport, MailerError};

/// Outcome of one email delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryResult {
    pub fn sent(message_id: String) -> Self {
        Self {
            success: true,
            message_id: Some(message_id),
            error: None,
        }
    }

    pub fn failed(error: &MailerError) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.to_string()),
        }
    }
}

/// Results for both notification emails of one inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub confirmation: DeliveryResult,
    pub admin_notification: DeliveryResult,
}

impl DispatchReport {
    pub fn all_sent(&self) -> bool {
        self.confirmation.success && self.admin_notification.success
    }
}

/// Sends the customer confirmation and the admin alert.
///
/// Never returns an error: every failure ends up in a [`DeliveryResult`].
/// There is no retry; each call makes at most one attempt per kind.
#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
    admin_address: String,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, admin_address: impl Into<String>) -> Self {
        Self {
            transport,
            admin_address: admin_address.into(),
        }
    }

    /// Address admin alerts go to.
    pub fn admin_address(&self) -> &str {
        &self.admin_address
    }

    /// Send both emails for a freshly persisted contact.
    ///
    /// The two kinds are independent: a failed confirmation does not stop
    /// the admin alert from being attempted.
    pub async fn dispatch(
        &self,
        contact: &ContactSnapshot,
        content: &EmailContentConfig,
    ) -> DispatchReport {
        let confirmation = self
            .send_kind(EmailKind::Confirmation, contact, content, &contact.email)
            .await;
        let admin_notification = self
            .send_kind(EmailKind::AdminNotification, contact, content, &self.admin_address)
            .await;

        DispatchReport {
            confirmation,
            admin_notification,
        }
    }

    /// Send a sample email of `kind` to an arbitrary address.
    pub async fn send_test(
        &self,
        kind: EmailKind,
        to: &str,
        content: &EmailContentConfig,
    ) -> DeliveryResult {
        let contact = ContactSnapshot::sample();
        let mut rendered = render_with_config(kind, &contact, content);
        rendered.subject = format!("[Test] {}", rendered.subject);
        self.deliver(kind, Email::from_rendered(rendered, to)).await
    }

    async fn send_kind(
        &self,
        kind: EmailKind,
        contact: &ContactSnapshot,
        content: &EmailContentConfig,
        to: &str,
    ) -> DeliveryResult {
        let rendered = render_with_config(kind, contact, content);
        self.deliver(kind, Email::from_rendered(rendered, to)).await
    }

    async fn deliver(&self, kind: EmailKind, email: Email) -> DeliveryResult {
        if let Err(err) = self.transport.verify().await {
            warn!(kind = %kind, to = %email.to, error = %err, "Mail transport unavailable, skipping send");
            return DeliveryResult::failed(&err);
        }

        match self.transport.send(&email).await {
            Ok(message_id) => {
                info!(kind = %kind, to = %email.to, message_id = %message_id, "Notification sent");
                DeliveryResult::sent(message_id)
            }
            Err(err) => {
                warn!(kind = %kind, to = %email.to, error = %err, "Notification failed");
                DeliveryResult::failed(&err)
            }
        }
    }
}
