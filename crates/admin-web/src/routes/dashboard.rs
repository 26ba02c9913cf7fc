//! Dashboard routes.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use database::ContactStatus;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub stats: Stats,
}

/// Dashboard statistics.
#[derive(Clone, Serialize)]
pub struct Stats {
    pub contact_count: i64,
    pub customer_count: i64,
    pub statuses: Vec<StatusStats>,
}

/// Number of contacts in one status.
#[derive(Clone, Serialize)]
pub struct StatusStats {
    pub status: ContactStatus,
    pub contact_count: i64,
}

/// Render the dashboard page.
pub async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>> {
    let stats = get_stats(&state).await?;
    Ok(Html(DashboardTemplate { stats }.render()?))
}

/// Get dashboard statistics as JSON.
pub async fn stats_api(State(state): State<AppState>) -> Result<Json<Stats>> {
    let stats = get_stats(&state).await?;
    Ok(Json(stats))
}

/// Fetch statistics from the database.
async fn get_stats(state: &AppState) -> Result<Stats> {
    let pool = state.db.pool();

    let contact_count = database::contact::count_contacts(pool).await?;
    let customer_count = database::customer::count_customers(pool).await?;
    let by_status = database::contact::count_contacts_by_status(pool).await?;

    // Every status is listed, including empty ones.
    let statuses = ContactStatus::ALL
        .into_iter()
        .map(|status| StatusStats {
            status,
            contact_count: by_status
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        })
        .collect();

    Ok(Stats {
        contact_count,
        customer_count,
        statuses,
    })
}
