//! API routes module

pub mod calendar;
pub mod legacy;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Anchor events, occurrences, reminders and terms
        .nest("/calendar", calendar::router())
        // Events saved by older clients and their import
        .nest("/calendar/legacy", legacy::router())
}
