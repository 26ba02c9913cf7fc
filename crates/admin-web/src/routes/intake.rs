//! Public inquiry form endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inquiry::{submit_inquiry, ContactForm, IntakeOutcome};

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Record an inquiry and send its notifications.
///
/// Responds `201` once the contact is stored, whatever happened to the
/// emails; the per-email results are in the body.
pub async fn submit_api(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Result<(StatusCode, Json<IntakeOutcome>)> {
    let outcome = submit_inquiry(state.db.pool(), &state.dispatcher, form).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
