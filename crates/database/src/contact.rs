//! Contact inquiry CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Contact, ContactStatus, NewContact};
use crate::validation::{validate_new_contact, validate_responsible};

const CONTACT_COLUMNS: &str = r#"
    id, full_name, email, whatsapp, quantity, preferred_date, message,
    status, responsible, created_at, updated_at
"#;

/// Insert a new contact with status `new`.
///
/// Every field is validated first; nothing is written if validation fails.
pub async fn create_contact(pool: &SqlitePool, contact: &NewContact) -> Result<Contact> {
    validate_new_contact(contact)?;

    let result = sqlx::query(
        r#"
        INSERT INTO contacts (full_name, email, whatsapp, quantity, preferred_date, message, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(contact.full_name.trim())
    .bind(contact.email.trim())
    .bind(contact.whatsapp.as_deref().map(str::trim))
    .bind(contact.quantity as i64)
    .bind(contact.preferred_date.trim())
    .bind(contact.message.as_deref().map(str::trim))
    .bind(ContactStatus::New)
    .execute(pool)
    .await?;

    get_contact(pool, result.last_insert_rowid()).await
}

/// Get a contact by ID.
pub async fn get_contact(pool: &SqlitePool, id: i64) -> Result<Contact> {
    sqlx::query_as::<_, Contact>(&format!(
        "SELECT {} FROM contacts WHERE id = ?",
        CONTACT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Contact",
        id: id.to_string(),
    })
}

/// List contacts, newest first, optionally filtered by status.
pub async fn list_contacts(pool: &SqlitePool, status: Option<ContactStatus>) -> Result<Vec<Contact>> {
    let contacts = match status {
        Some(status) => {
            sqlx::query_as::<_, Contact>(&format!(
                "SELECT {} FROM contacts WHERE status = ? ORDER BY created_at DESC, id DESC",
                CONTACT_COLUMNS
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Contact>(&format!(
                "SELECT {} FROM contacts ORDER BY created_at DESC, id DESC",
                CONTACT_COLUMNS
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(contacts)
}

/// Set a contact's status.
pub async fn update_status(pool: &SqlitePool, id: i64, status: ContactStatus) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE contacts
        SET status = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Assign or clear the staff member responsible for a contact.
pub async fn set_responsible(pool: &SqlitePool, id: i64, responsible: Option<&str>) -> Result<()> {
    let responsible = responsible.map(str::trim).filter(|r| !r.is_empty());
    if let Some(name) = responsible {
        validate_responsible(name)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE contacts
        SET responsible = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(responsible)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Permanently delete a contact.
pub async fn delete_contact(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Count total contacts.
pub async fn count_contacts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM contacts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Count contacts grouped by status.
pub async fn count_contacts_by_status(pool: &SqlitePool) -> Result<Vec<(ContactStatus, i64)>> {
    let rows = sqlx::query_as::<_, (ContactStatus, i64)>(
        r#"
        SELECT status, COUNT(*) as count
        FROM contacts
        GROUP BY status
        ORDER BY count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
