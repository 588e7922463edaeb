//! Router for the calendar API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use axum_extra::extract::Query;
use uuid::Uuid;

use super::public;
use crate::api::state::AppState;
use crate::calendar::{
    AnchorEvent, Occurrence, Reminder, TermCalendar, delete_anchor_event, expand_all,
    list_anchor_events, reminders_due, sort_chronologically, upsert_anchor_event,
    validate_anchor_id, within,
};

type SharedState = Arc<AppState>;

/// List the user's anchor events
async fn list_events(
    State(state): State<SharedState>,
    Query(params): Query<public::UserQuery>,
) -> Result<Json<Vec<AnchorEvent>>, crate::api::public::ApiError> {
    let events = list_anchor_events(&state.db, &params.user_id).await?;
    Ok(Json(events))
}

/// Create or fully replace an anchor event
async fn upsert_event(
    State(state): State<SharedState>,
    Query(params): Query<public::UserQuery>,
    Json(payload): Json<public::UpsertEventRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let event = AnchorEvent {
        id: payload.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        date: payload.date,
        details: payload.details,
    };

    if let Err(e) = validate_anchor_id(&event.id) {
        return Ok((StatusCode::BAD_REQUEST, e.to_string()).into_response());
    }

    let written = upsert_anchor_event(&state.db, &event, &params.user_id).await?;
    if written == 0 {
        // The id exists but belongs to someone else
        tracing::warn!(
            "User {} attempted to overwrite event {}",
            params.user_id,
            event.id
        );
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    Ok(Json(event).into_response())
}

/// Delete one of the user's anchor events
async fn delete_event(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<public::UserQuery>,
) -> Result<Json<public::DeleteEventResponse>, crate::api::public::ApiError> {
    let deleted = delete_anchor_event(&state.db, &id, &params.user_id).await?;
    Ok(Json(public::DeleteEventResponse { deleted }))
}

/// Expand the user's events into dated occurrences, sorted and
/// optionally limited to a date window
async fn list_occurrences(
    State(state): State<SharedState>,
    Query(params): Query<public::OccurrencesQuery>,
) -> Result<Json<Vec<Occurrence>>, crate::api::public::ApiError> {
    let events = list_anchor_events(&state.db, &params.user_id).await?;
    let mut occurrences = within(expand_all(&events, &state.terms), params.from, params.to);
    sort_chronologically(&mut occurrences);
    Ok(Json(occurrences))
}

/// Reminders due on the requested date
async fn list_reminders(
    State(state): State<SharedState>,
    Query(params): Query<public::RemindersQuery>,
) -> Result<Json<Vec<Reminder>>, crate::api::public::ApiError> {
    let today = params
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let events = list_anchor_events(&state.db, &params.user_id).await?;
    let occurrences = expand_all(&events, &state.terms);
    Ok(Json(reminders_due(&occurrences, today)))
}

/// The active term catalog
async fn list_terms(State(state): State<SharedState>) -> Json<TermCalendar> {
    Json(state.terms.as_ref().clone())
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/events", get(list_events).post(upsert_event))
        .route("/events/{id}", delete(delete_event))
        .route("/occurrences", get(list_occurrences))
        .route("/reminders", get(list_reminders))
        .route("/terms", get(list_terms))
}
