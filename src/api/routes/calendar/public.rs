//! Public types for the calendar API
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::EventDetails;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct OccurrencesQuery {
    pub user_id: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct RemindersQuery {
    pub user_id: String,
    // Defaults to today's local date
    pub date: Option<NaiveDate>,
}

/// Create or replace an anchor event. A new id is generated when none
/// is given.
#[derive(Deserialize)]
pub struct UpsertEventRequest {
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub details: EventDetails,
}

#[derive(Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub deleted: usize,
}
