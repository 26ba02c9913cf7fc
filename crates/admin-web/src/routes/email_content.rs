//! Email content management: view, edit, reset, preview and test-send the
//! two notification emails.

use axum::extract::{Query, State};
use axum::Json;
use database::validation::validate_email;
use email_templates::{
    render, ContactSnapshot, ContentOverride, EmailContentConfig, EmailKind, Placeholder,
    RenderedEmail, TemplateContent,
};
use inquiry::content::{load_content_config, reset_override, save_override};
use inquiry::{InquiryError, Notice};
use mailer::DeliveryResult;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Current email content for both kinds.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContentResponse {
    /// Effective confirmation content (defaults merged with the override).
    pub confirmation: TemplateContent,
    /// Effective admin alert content.
    pub admin_notification: TemplateContent,
    /// The stored overrides alone.
    pub overrides: EmailContentConfig,
    /// Tokens that may be used in any field, e.g. `{fullName}`.
    pub placeholders: Vec<String>,
}

/// Request to store an override for one kind.
#[derive(Deserialize)]
pub struct UpdateContentRequest {
    pub kind: EmailKind,
    #[serde(default)]
    pub content: ContentOverride,
}

/// Which kind to reset; both when absent.
#[derive(Debug, Default, Deserialize)]
pub struct KindQuery {
    pub kind: Option<EmailKind>,
}

/// Request to preview an email against the sample contact.
#[derive(Deserialize)]
pub struct PreviewRequest {
    pub kind: EmailKind,
    /// Unsaved draft; the stored override is used when absent.
    #[serde(default)]
    pub content: Option<ContentOverride>,
}

/// Request to send a sample email.
#[derive(Deserialize)]
pub struct TestRequest {
    pub kind: EmailKind,
    pub to: String,
}

/// Test send result.
#[derive(Serialize)]
pub struct TestResponse {
    pub notice: Notice,
    pub result: DeliveryResult,
}

/// Get the effective content and the stored overrides.
pub async fn get_api(State(state): State<AppState>) -> Result<Json<EmailContentResponse>> {
    let overrides = load_content_config(state.db.pool()).await?;

    Ok(Json(EmailContentResponse {
        confirmation: overrides.resolve(EmailKind::Confirmation),
        admin_notification: overrides.resolve(EmailKind::AdminNotification),
        placeholders: Placeholder::ALL
            .iter()
            .map(|p| format!("{{{}}}", p.name()))
            .collect(),
        overrides,
    }))
}

/// Store the override for one kind. Blank fields keep their defaults.
pub async fn update_api(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateContentRequest>,
) -> Result<Json<Notice>> {
    save_override(state.db.pool(), req.kind, &req.content).await?;

    let notice = if req.content.is_empty() {
        Notice::success(format!("{} email reset to defaults", label(req.kind)))
    } else {
        Notice::success(format!("{} email content saved", label(req.kind)))
    };
    Ok(Json(notice))
}

/// Reset one kind, or both, to the default content.
pub async fn reset_api(
    State(state): State<AppState>,
    Query(query): Query<KindQuery>,
) -> Result<Json<Notice>> {
    let pool = state.db.pool();

    let notice = match query.kind {
        Some(kind) => {
            reset_override(pool, kind).await?;
            Notice::success(format!("{} email reset to defaults", label(kind)))
        }
        None => {
            for kind in EmailKind::ALL {
                reset_override(pool, kind).await?;
            }
            Notice::success("All emails reset to defaults")
        }
    };
    Ok(Json(notice))
}

/// Render an email for the sample contact.
pub async fn preview_api(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PreviewRequest>,
) -> Result<Json<RenderedEmail>> {
    let sample = ContactSnapshot::sample();

    let rendered = match req.content {
        Some(draft) => render(req.kind, &sample, Some(&draft)),
        None => {
            let config = load_content_config(state.db.pool()).await?;
            render(req.kind, &sample, config.get(req.kind))
        }
    };
    Ok(Json(rendered))
}

/// Send a sample email of one kind to any address.
pub async fn test_api(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TestRequest>,
) -> Result<Json<TestResponse>> {
    let to = req.to.trim();
    validate_email(to).map_err(InquiryError::from)?;

    let config = load_content_config(state.db.pool()).await?;
    let result = state.dispatcher.send_test(req.kind, to, &config).await;

    let notice = if result.success {
        Notice::success(format!("Test {} email sent to {to}", label(req.kind).to_lowercase()))
    } else {
        Notice::error(format!(
            "Test email to {to} failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        ))
    };
    Ok(Json(TestResponse { notice, result }))
}

fn label(kind: EmailKind) -> &'static str {
    match kind {
        EmailKind::Confirmation => "Confirmation",
        EmailKind::AdminNotification => "Admin notification",
    }
}
