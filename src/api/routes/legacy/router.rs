//! Router for the legacy event API (events saved by older clients)

use std::sync::Arc;

use axum::{Json, Router, extract::State};
use axum_extra::extract::Query;
use serde_json::Value;

use super::public;
use crate::api::state::AppState;
use crate::calendar::{LegacyEvent, LegacyStore, SqliteLegacyStore, migrate_legacy_events};

type SharedState = Arc<AppState>;

async fn legacy_get(
    State(state): State<SharedState>,
    Query(params): Query<public::LegacyQuery>,
) -> Result<Json<Vec<LegacyEvent>>, crate::api::public::ApiError> {
    let legacy = SqliteLegacyStore::new(state.db.clone());
    Ok(Json(legacy.load(&params.user_id).await?))
}

async fn legacy_set(
    State(state): State<SharedState>,
    Query(params): Query<public::LegacyQuery>,
    Json(events): Json<Vec<LegacyEvent>>,
) -> Result<Json<Value>, crate::api::public::ApiError> {
    let legacy = SqliteLegacyStore::new(state.db.clone());
    legacy.replace(&params.user_id, &events).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// Import the user's legacy events into the event store
async fn legacy_migrate(
    State(state): State<SharedState>,
    Query(params): Query<public::LegacyQuery>,
) -> Result<Json<public::MigrateResponse>, crate::api::public::ApiError> {
    let legacy = SqliteLegacyStore::new(state.db.clone());
    let migrated = migrate_legacy_events(&state.db, &legacy, &params.user_id).await?;
    Ok(Json(public::MigrateResponse { migrated }))
}

/// Create the legacy router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(legacy_get).post(legacy_set))
        .route("/migrate", axum::routing::post(legacy_migrate))
}
