//! Contact management routes.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use database::{Contact, ContactStatus};
use inquiry::{set_status, InquiryError, Notice, StatusOutcome};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Contacts page template.
#[derive(Template)]
#[template(path = "contacts.html")]
pub struct ContactsTemplate {
    pub contacts: Vec<Contact>,
    pub statuses: [ContactStatus; 5],
    /// Active status filter, empty for all.
    pub filter: String,
}

/// Optional status filter for contact listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Request to change a contact's status.
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Request to assign the responsible staff member. `null` or blank clears it.
#[derive(Deserialize)]
pub struct ResponsibleRequest {
    #[serde(default)]
    pub responsible: Option<String>,
}

/// Status change result.
#[derive(Serialize)]
pub struct StatusResponse {
    pub notice: Notice,
    #[serde(flatten)]
    pub outcome: StatusOutcome,
}

/// A contact together with the notice for the action that produced it.
#[derive(Serialize)]
pub struct ContactResponse {
    pub notice: Notice,
    pub contact: Contact,
}

/// Render the contacts page.
pub async fn contacts_page(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let status = parse_filter(query.status.as_deref())?;
    let contacts = database::contact::list_contacts(state.db.pool(), status).await?;

    let page = ContactsTemplate {
        contacts,
        statuses: ContactStatus::ALL,
        filter: status.map(|s| s.to_string()).unwrap_or_default(),
    };
    Ok(Html(page.render()?))
}

/// List contacts as JSON, newest first.
pub async fn list_api(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>> {
    let status = parse_filter(query.status.as_deref())?;
    let contacts = database::contact::list_contacts(state.db.pool(), status).await?;
    Ok(Json(contacts))
}

/// Get a single contact.
pub async fn get_api(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Contact>> {
    let contact = database::contact::get_contact(state.db.pool(), id).await?;
    Ok(Json(contact))
}

/// Change a contact's status, converting it to a customer when booked.
pub async fn update_status_api(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<StatusRequest>,
) -> Result<Json<StatusResponse>> {
    let outcome = set_status(state.db.pool(), id, &req.status).await?;
    Ok(Json(StatusResponse {
        notice: outcome.notice(),
        outcome,
    }))
}

/// Assign or clear the staff member handling a contact.
pub async fn update_responsible_api(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<ResponsibleRequest>,
) -> Result<Json<ContactResponse>> {
    let pool = state.db.pool();
    database::contact::set_responsible(pool, id, req.responsible.as_deref()).await?;
    let contact = database::contact::get_contact(pool, id).await?;

    let notice = match &contact.responsible {
        Some(name) => Notice::success(format!("Contact #{id} assigned to {name}")),
        None => Notice::success(format!("Contact #{id} unassigned")),
    };
    info!(contact_id = id, responsible = ?contact.responsible, "Contact responsible updated");

    Ok(Json(ContactResponse { notice, contact }))
}

/// Delete a contact. Its customer, if any, is kept.
pub async fn delete_api(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Notice>> {
    database::contact::delete_contact(state.db.pool(), id).await?;
    info!(contact_id = id, "Contact deleted");
    Ok(Json(Notice::success(format!("Contact #{id} deleted"))))
}

fn parse_filter(status: Option<&str>) -> Result<Option<ContactStatus>> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(Some(s.parse::<ContactStatus>().map_err(InquiryError::from)?)),
        None => Ok(None),
    }
}
