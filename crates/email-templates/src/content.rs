//! Template content: hard-coded defaults and admin overrides.

use serde::{Deserialize, Serialize};

use crate::EmailKind;

/// The complete set of text fields making up one email.
///
/// Every field may contain placeholder tokens such as `{fullName}`. Fields
/// other than `subject` may contain simple markup (`<br>`, `<strong>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContent {
    pub subject: String,
    pub greeting: String,
    pub intro: String,
    #[serde(alias = "bodyDetails")]
    pub details: String,
    pub response: String,
    pub footer: String,
    pub signature: String,
}

impl TemplateContent {
    /// Hard-coded default content for a kind.
    pub fn default_for(kind: EmailKind) -> Self {
        match kind {
            EmailKind::Confirmation => Self {
                subject: "Thank you for your inquiry, {fullName}!".to_string(),
                greeting: "Dear {fullName},".to_string(),
                intro: "Thank you for reaching out to Roving Travel. We have received your \
                        travel inquiry and our team is already looking into it."
                    .to_string(),
                details: "You asked about a trip for <strong>{quantity}</strong> traveller(s) \
                          on <strong>{date}</strong>.<br>Your message: {message}"
                    .to_string(),
                response: "One of our travel specialists will get back to you within 24 hours \
                           by email or on WhatsApp ({whatsapp})."
                    .to_string(),
                footer: "You are receiving this email because you submitted an inquiry \
                         on the Roving Travel website."
                    .to_string(),
                signature: "Warm regards,<br>The Roving Travel Team".to_string(),
            },
            EmailKind::AdminNotification => Self {
                subject: "New inquiry from {fullName} ({quantity} travellers, {date})".to_string(),
                greeting: "Hello,".to_string(),
                intro: "A new travel inquiry has been submitted through the contact form."
                    .to_string(),
                details: "<strong>{fullName}</strong> ({email}, WhatsApp: {whatsapp}) would like \
                          to travel with {quantity} people on {date}.<br>Message: {message}"
                    .to_string(),
                response: "Please follow up within 24 hours and update inquiry #{contactId} \
                           in the dashboard."
                    .to_string(),
                footer: "Roving Travel admin notification for inquiry #{contactId}".to_string(),
                signature: "Roving Travel System".to_string(),
            },
        }
    }

    /// Replace every field supplied by `overrides`, keeping the rest.
    ///
    /// Empty strings in the override count as "not supplied".
    pub fn with_override(mut self, overrides: Option<&ContentOverride>) -> Self {
        let Some(o) = overrides else {
            return self;
        };

        fn apply(field: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                if !v.trim().is_empty() {
                    *field = v.clone();
                }
            }
        }

        apply(&mut self.subject, &o.subject);
        apply(&mut self.greeting, &o.greeting);
        apply(&mut self.intro, &o.intro);
        apply(&mut self.details, &o.details);
        apply(&mut self.response, &o.response);
        apply(&mut self.footer, &o.footer);
        apply(&mut self.signature, &o.signature);
        self
    }
}

/// Any subset of the template fields, supplied by an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(alias = "bodyDetails", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ContentOverride {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        [
            &self.subject,
            &self.greeting,
            &self.intro,
            &self.details,
            &self.response,
            &self.footer,
            &self.signature,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Overrides for both kinds, loaded by the host before each send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailContentConfig {
    pub confirmation: Option<ContentOverride>,
    pub admin_notification: Option<ContentOverride>,
}

impl EmailContentConfig {
    /// Override for one kind, if any.
    pub fn get(&self, kind: EmailKind) -> Option<&ContentOverride> {
        match kind {
            EmailKind::Confirmation => self.confirmation.as_ref(),
            EmailKind::AdminNotification => self.admin_notification.as_ref(),
        }
    }

    /// Set or clear the override for one kind.
    pub fn set(&mut self, kind: EmailKind, value: Option<ContentOverride>) {
        let value = value.filter(|o| !o.is_empty());
        match kind {
            EmailKind::Confirmation => self.confirmation = value,
            EmailKind::AdminNotification => self.admin_notification = value,
        }
    }

    /// Effective content for a kind (defaults merged with the override).
    pub fn resolve(&self, kind: EmailKind) -> TemplateContent {
        TemplateContent::default_for(kind).with_override(self.get(kind))
    }
}
