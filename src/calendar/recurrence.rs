//! Recurrence rule attached to an anchor event
use std::fmt;

use chrono::Weekday;
use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

const WEEKLY_PREFIX: &str = "weekly_";

/// A recurrence rule as stored on an anchor. Only the exact lowercase
/// `weekly_<weekday>` form is a weekly rule. Anything else is kept
/// verbatim as `Unrecognized` so it survives a store round-trip and
/// expands as a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    Weekly(Weekday),
    Unrecognized(String),
}

impl Recurrence {
    pub fn parse(raw: &str) -> Self {
        raw.strip_prefix(WEEKLY_PREFIX)
            .and_then(weekday_from_name)
            .map(Recurrence::Weekly)
            .unwrap_or_else(|| Recurrence::Unrecognized(raw.to_string()))
    }

    /// The target weekday when this is a supported weekly rule.
    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Recurrence::Weekly(weekday) => Some(*weekday),
            Recurrence::Unrecognized(_) => None,
        }
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Weekly(weekday) => write!(f, "{}{}", WEEKLY_PREFIX, weekday_name(*weekday)),
            Recurrence::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for Recurrence {
    fn from(raw: String) -> Self {
        Recurrence::parse(&raw)
    }
}

impl From<Recurrence> for String {
    fn from(recurrence: Recurrence) -> Self {
        recurrence.to_string()
    }
}

impl ToSql for Recurrence {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.to_string().into())
    }
}

impl FromSql for Recurrence {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(Recurrence::parse(value.as_str()?))
    }
}
