//! Anchor events, the persisted unit a user edits
use std::fmt;

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use super::occurrence::DERIVED_ID_SEPARATOR;
use super::recurrence::Recurrence;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    #[default]
    Personal,
    Academic,
    Other(String),
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Personal => f.write_str("personal"),
            EventKind::Academic => f.write_str("academic"),
            EventKind::Other(kind) => f.write_str(kind),
        }
    }
}

impl From<String> for EventKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "personal" => EventKind::Personal,
            "academic" => EventKind::Academic,
            _ => EventKind::Other(kind),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.to_string()
    }
}

impl ToSql for EventKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.to_string().into())
    }
}

impl FromSql for EventKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(EventKind::from(value.as_str()?.to_string()))
    }
}

/// Which reminders the owner wants for each occurrence of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    #[serde(rename = "notify_enabled", default)]
    pub enabled: bool,
    #[serde(rename = "notify_same_day", default)]
    pub same_day: bool,
    #[serde(rename = "notify_1_day", default)]
    pub one_day: bool,
    #[serde(rename = "notify_7_days", default)]
    pub seven_days: bool,
}

/// Everything about an event that is copied onto each of its
/// occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    #[serde(flatten)]
    pub notifications: NotificationPrefs,
}

impl EventDetails {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            time: None,
            end_time: None,
            kind: EventKind::default(),
            category: None,
            description: None,
            location: None,
            course_code: None,
            recurrence: None,
            notifications: NotificationPrefs::default(),
        }
    }
}

/// A persisted calendar entry. For a recurring event `date` is the
/// first date the event was ever placed on, which need not fall on the
/// recurrence weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorEvent {
    pub id: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub details: EventDetails,
}

impl AnchorEvent {
    pub fn new(id: &str, date: NaiveDate, details: EventDetails) -> Self {
        Self {
            id: id.to_string(),
            date,
            details,
        }
    }
}

/// Anchor ids share a namespace with derived occurrence ids once
/// serialized, so they must be non-empty and can't contain the
/// separator used by derived ids.
pub fn validate_anchor_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("Event id must not be empty");
    }
    if id.contains(DERIVED_ID_SEPARATOR) {
        bail!(
            "Event id {} must not contain '{}'",
            id,
            DERIVED_ID_SEPARATOR
        );
    }
    Ok(())
}
