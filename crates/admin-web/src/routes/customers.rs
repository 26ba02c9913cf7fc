//! Customer routes.

use axum::extract::State;
use axum::Json;
use database::CustomerSummary;

use crate::error::Result;
use crate::state::AppState;

/// List customers, newest first, with their originating contact.
pub async fn list_api(State(state): State<AppState>) -> Result<Json<Vec<CustomerSummary>>> {
    let customers = database::customer::list_customers(state.db.pool()).await?;
    Ok(Json(customers))
}
