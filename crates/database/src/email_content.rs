//! Persisted email content overrides.
//!
//! Overrides are stored per email kind as opaque JSON; parsing belongs to the
//! caller.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::EmailContentOverride;

/// Get the override for one kind.
pub async fn get_override(pool: &SqlitePool, kind: &str) -> Result<Option<EmailContentOverride>> {
    let record = sqlx::query_as::<_, EmailContentOverride>(
        r#"
        SELECT kind, content, updated_at
        FROM email_content_overrides
        WHERE kind = ?
        "#,
    )
    .bind(kind)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// List all stored overrides.
pub async fn list_overrides(pool: &SqlitePool) -> Result<Vec<EmailContentOverride>> {
    let records = sqlx::query_as::<_, EmailContentOverride>(
        r#"
        SELECT kind, content, updated_at
        FROM email_content_overrides
        ORDER BY kind
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Insert or replace the override for one kind.
pub async fn upsert_override(pool: &SqlitePool, kind: &str, content: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO email_content_overrides (kind, content, updated_at)
        VALUES (?, ?, datetime('now'))
        ON CONFLICT(kind) DO UPDATE SET
            content = excluded.content,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(kind)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove the override for one kind. Returns whether one existed.
pub async fn delete_override(pool: &SqlitePool, kind: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM email_content_overrides
        WHERE kind = ?
        "#,
    )
    .bind(kind)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
