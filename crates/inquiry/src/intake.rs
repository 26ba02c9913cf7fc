//! Public contact form intake.

use database::{contact, Contact, NewContact, ValidationError};
use email_templates::ContactSnapshot;
use mailer::{DispatchReport, NotificationDispatcher};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::content::load_content_config_or_default;
use crate::error::Result;

/// The public inquiry form as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    /// Party size.
    pub quantity: i64,
    /// Preferred travel date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    /// Trim fields, turn blank optionals into `None`, and check the party size.
    pub fn normalize(self) -> std::result::Result<NewContact, ValidationError> {
        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let quantity = database::validation::validate_quantity(self.quantity)?;

        Ok(NewContact {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            whatsapp: optional(self.whatsapp),
            quantity,
            preferred_date: self.date.trim().to_string(),
            message: optional(self.message),
        })
    }
}

/// Result of a successful intake.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeOutcome {
    pub contact: Contact,
    pub notifications: DispatchReport,
}

/// Template view of a stored contact.
pub fn snapshot(contact: &Contact) -> ContactSnapshot {
    ContactSnapshot {
        id: Some(contact.id),
        full_name: contact.full_name.clone(),
        email: contact.email.clone(),
        whatsapp: contact.whatsapp.clone(),
        quantity: u32::try_from(contact.quantity).unwrap_or(1),
        date: contact.preferred_date.clone(),
        message: contact.message.clone(),
    }
}

/// Record an inquiry and notify the customer and the admin.
///
/// The contact row is written before any email is attempted. Email failures
/// are reported in the outcome and never fail the intake.
pub async fn submit_inquiry(
    pool: &SqlitePool,
    dispatcher: &NotificationDispatcher,
    form: ContactForm,
) -> Result<IntakeOutcome> {
    let new_contact = form.normalize()?;
    let contact = contact::create_contact(pool, &new_contact).await?;

    info!(
        contact_id = contact.id,
        quantity = contact.quantity,
        date = %contact.preferred_date,
        "Recorded new inquiry"
    );

    let content = load_content_config_or_default(pool).await;
    let notifications = dispatcher.dispatch(&snapshot(&contact), &content).await;

    info!(
        contact_id = contact.id,
        confirmation_sent = notifications.confirmation.success,
        admin_notified = notifications.admin_notification.success,
        "Inquiry notifications dispatched"
    );

    Ok(IntakeOutcome {
        contact,
        notifications,
    })
}
