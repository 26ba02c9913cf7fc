//! Contact status machine and customer conversion.
//!
//! ```text
//! new ──► contacted ──► booked
//!  │  └──────────────────▲
//!  └──► fake
//! any ──► archived
//! ```
//!
//! Moving to `booked` also creates the contact's customer. That insert runs
//! after the status write and is not rolled back with it: if it fails the
//! contact stays `booked` and the outcome carries a warning. Setting `booked`
//! again on a booked contact retries the conversion.

use database::{contact, customer, Contact, ContactStatus, Customer, DatabaseError};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{InquiryError, Result};
use crate::notice::Notice;

/// Whether an admin may move a contact from `from` to `to`.
pub fn can_transition(from: ContactStatus, to: ContactStatus) -> bool {
    use ContactStatus::*;

    matches!(
        (from, to),
        (_, Archived)
            | (New, Contacted)
            | (New, Fake)
            | (New, Booked)
            | (Contacted, Booked)
            | (Booked, Booked)
    )
}

/// What a status change did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StatusOutcome {
    /// Status written; no conversion involved.
    Updated { contact: Contact },
    /// Status written and a customer created.
    Converted { contact: Contact, customer: Customer },
    /// Contact is booked and already had a customer; nothing new created.
    AlreadyConverted { contact: Contact, customer: Customer },
    /// Status written but the customer could not be created.
    ConversionFailed { contact: Contact, error: String },
}

impl StatusOutcome {
    pub fn contact(&self) -> &Contact {
        match self {
            StatusOutcome::Updated { contact }
            | StatusOutcome::Converted { contact, .. }
            | StatusOutcome::AlreadyConverted { contact, .. }
            | StatusOutcome::ConversionFailed { contact, .. } => contact,
        }
    }

    /// The admin-facing message for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            StatusOutcome::Updated { contact } => {
                Notice::success(format!("Contact #{} marked as {}", contact.id, contact.status))
            }
            StatusOutcome::Converted { contact, customer } => Notice::success(format!(
                "Contact #{} marked as booked and converted to customer #{}",
                contact.id, customer.id
            )),
            StatusOutcome::AlreadyConverted { contact, customer } => Notice::success(format!(
                "Contact #{} is booked; customer #{} already exists",
                contact.id, customer.id
            )),
            StatusOutcome::ConversionFailed { contact, error } => Notice::warning(format!(
                "Contact #{} marked as booked, but creating the customer failed: {}. \
                 Mark it as booked again to retry.",
                contact.id, error
            )),
        }
    }
}

/// Set a contact's status from its wire name.
///
/// Unknown status values are rejected before anything is read or written.
pub async fn set_status(pool: &SqlitePool, contact_id: i64, status: &str) -> Result<StatusOutcome> {
    let status: ContactStatus = status.parse()?;
    apply_status(pool, contact_id, status).await
}

/// Move a contact to `status`, converting it to a customer when booked.
pub async fn apply_status(
    pool: &SqlitePool,
    contact_id: i64,
    status: ContactStatus,
) -> Result<StatusOutcome> {
    let mut current = contact::get_contact(pool, contact_id).await?;
    let from = current.status;

    if !can_transition(from, status) {
        return Err(InquiryError::InvalidTransition {
            id: contact_id,
            from,
            to: status,
        });
    }

    if from != status {
        contact::update_status(pool, contact_id, status).await?;
        current.status = status;
        info!(contact_id, from = %from, to = %status, "Contact status updated");
    }

    if status != ContactStatus::Booked {
        return Ok(StatusOutcome::Updated { contact: current });
    }

    Ok(convert(pool, current).await)
}

/// Create the customer for a booked contact. Never fails; problems become
/// `ConversionFailed`.
async fn convert(pool: &SqlitePool, contact: Contact) -> StatusOutcome {
    match customer::find_customer_by_contact(pool, contact.id).await {
        Ok(Some(existing)) => {
            info!(contact_id = contact.id, customer_id = existing.id, "Contact already converted");
            return StatusOutcome::AlreadyConverted {
                contact,
                customer: existing,
            };
        }
        Ok(None) => {}
        Err(err) => return conversion_failed(contact, err),
    }

    match customer::create_customer_for_contact(pool, contact.id).await {
        Ok(created) => {
            info!(contact_id = contact.id, customer_id = created.id, "Contact converted to customer");
            StatusOutcome::Converted {
                contact,
                customer: created,
            }
        }
        // Lost a race with a concurrent booking of the same contact.
        Err(DatabaseError::AlreadyExists { .. }) => {
            match customer::find_customer_by_contact(pool, contact.id).await {
                Ok(Some(existing)) => StatusOutcome::AlreadyConverted {
                    contact,
                    customer: existing,
                },
                Ok(None) => {
                    let err = missing_customer(contact.id);
                    conversion_failed(contact, err)
                }
                Err(err) => conversion_failed(contact, err),
            }
        }
        Err(err) => conversion_failed(contact, err),
    }
}

/// The unique index rejected the insert, yet no customer can be found.
fn missing_customer(contact_id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "Customer for contact",
        id: contact_id.to_string(),
    }
}

fn conversion_failed(contact: Contact, err: DatabaseError) -> StatusOutcome {
    warn!(contact_id = contact.id, error = %err, "Contact booked but customer creation failed");
    StatusOutcome::ConversionFailed {
        contact,
        error: err.to_string(),
    }
}
