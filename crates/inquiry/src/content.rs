//! Loading and saving email content overrides.

use database::email_content;
use email_templates::{ContentOverride, EmailContentConfig, EmailKind};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::Result;

/// Load the current overrides for both kinds.
///
/// A stored override that no longer parses is skipped (and logged), so the
/// defaults apply for that kind.
pub async fn load_content_config(pool: &SqlitePool) -> Result<EmailContentConfig> {
    let mut config = EmailContentConfig::default();

    for record in email_content::list_overrides(pool).await? {
        let Ok(kind) = record.kind.parse::<EmailKind>() else {
            warn!(kind = %record.kind, "Ignoring override for unknown email kind");
            continue;
        };
        match serde_json::from_str::<ContentOverride>(&record.content) {
            Ok(parsed) => config.set(kind, Some(parsed)),
            Err(err) => warn!(kind = %kind, error = %err, "Ignoring unreadable email content override"),
        }
    }

    Ok(config)
}

/// Like [`load_content_config`], but falls back to defaults on any error.
pub async fn load_content_config_or_default(pool: &SqlitePool) -> EmailContentConfig {
    match load_content_config(pool).await {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "Failed to load email content overrides, using defaults");
            EmailContentConfig::default()
        }
    }
}

/// Store the override for one kind. An empty override removes it.
pub async fn save_override(pool: &SqlitePool, kind: EmailKind, overrides: &ContentOverride) -> Result<()> {
    if overrides.is_empty() {
        reset_override(pool, kind).await?;
        return Ok(());
    }

    let json = serde_json::to_string(overrides)?;
    email_content::upsert_override(pool, kind.as_str(), &json).await?;
    info!(kind = %kind, "Saved email content override");
    Ok(())
}

/// Drop the override for one kind, restoring the defaults.
pub async fn reset_override(pool: &SqlitePool, kind: EmailKind) -> Result<bool> {
    let existed = email_content::delete_override(pool, kind.as_str()).await?;
    if existed {
        info!(kind = %kind, "Reset email content to defaults");
    }
    Ok(existed)
}
