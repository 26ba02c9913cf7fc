//! Database models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::ValidationError;

/// Lifecycle status of a contact inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Contacted,
    Fake,
    Booked,
    Archived,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 5] = [
        ContactStatus::New,
        ContactStatus::Contacted,
        ContactStatus::Fake,
        ContactStatus::Booked,
        ContactStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Contacted => "contacted",
            ContactStatus::Fake => "fake",
            ContactStatus::Booked => "booked",
            ContactStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// A submitted travel inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Auto-incrementing ID.
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub whatsapp: Option<String>,
    /// Party size, always at least 1.
    pub quantity: i64,
    /// Preferred travel date (`YYYY-MM-DD`).
    pub preferred_date: String,
    pub message: Option<String>,
    pub status: ContactStatus,
    /// Staff member handling the inquiry.
    pub responsible: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Fields for inserting a contact. Status always starts as `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub whatsapp: Option<String>,
    pub quantity: u32,
    pub preferred_date: String,
    pub message: Option<String>,
}

/// Status given to customers created from the contact form.
pub const CUSTOMER_STATUS_ACTIVE: &str = "active";

/// Source tag for customers converted from a contact inquiry.
pub const CUSTOMER_SOURCE_CONTACT_FORM: &str = "contact_form";

/// A converted, tracked lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    /// Originating contact; cleared if that contact is deleted.
    pub contact_id: Option<i64>,
    pub status: String,
    pub source: String,
    pub created_at: String,
}

/// A customer joined with the contact it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: i64,
    pub contact_id: Option<i64>,
    pub status: String,
    pub source: String,
    pub created_at: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// A stored email content override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmailContentOverride {
    /// Email kind (`confirmation` or `adminNotification`).
    pub kind: String,
    /// JSON object holding any subset of the template fields.
    pub content: String,
    /// Last update timestamp.
    pub updated_at: String,
}
