//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness plus a database round trip. Mail is not checked here; every send
/// verifies the transport itself.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let database = match database::contact::count_contacts(state.db.pool()).await {
        Ok(_) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "Health check database query failed");
            "unavailable"
        }
    };

    Json(Health {
        status: "ok",
        database,
    })
}
