//! Email kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two notification emails sent for every inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmailKind {
    /// Customer-facing confirmation.
    Confirmation,
    /// Admin-facing alert about a new inquiry.
    AdminNotification,
}

impl EmailKind {
    /// All kinds, in dispatch order.
    pub const ALL: [EmailKind; 2] = [EmailKind::Confirmation, EmailKind::AdminNotification];

    /// Wire name, also used as the persisted override key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailKind::Confirmation => "confirmation",
            EmailKind::AdminNotification => "adminNotification",
        }
    }

    /// Display name of the sender identity for this kind.
    pub fn sender_name(&self) -> &'static str {
        match self {
            EmailKind::Confirmation => "Roving Travel",
            EmailKind::AdminNotification => "Roving Travel Admin",
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown email kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown email kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for EmailKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmation" => Ok(EmailKind::Confirmation),
            "adminNotification" | "admin_notification" => Ok(EmailKind::AdminNotification),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
