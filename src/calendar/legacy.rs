//! One-time import of events saved by older clients
//!
//! Older dashboards kept a flat list of events per user outside the
//! event table. `migrate_legacy_events` moves that list into the event
//! store and then empties it, so calling it again does nothing.
use anyhow::{Error, Result, bail};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::Connection;

use super::event::{AnchorEvent, EventDetails, EventKind, NotificationPrefs};
use super::store::upsert_anchor_events;

/// An event as older clients stored it. There is no recurrence and no
/// notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
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
}

impl From<LegacyEvent> for AnchorEvent {
    fn from(legacy: LegacyEvent) -> Self {
        AnchorEvent {
            id: legacy.id,
            date: legacy.date,
            details: EventDetails {
                title: legacy.title,
                time: legacy.time,
                end_time: legacy.end_time,
                kind: legacy.kind,
                category: legacy.category,
                description: legacy.description,
                location: legacy.location,
                course_code: legacy.course_code,
                recurrence: None,
                notifications: NotificationPrefs::default(),
            },
        }
    }
}

/// Where legacy event lists live, keyed by user.
#[async_trait]
pub trait LegacyStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Vec<LegacyEvent>, Error>;
    async fn replace(&self, user_id: &str, events: &[LegacyEvent]) -> Result<(), Error>;
    async fn clear(&self, user_id: &str) -> Result<(), Error>;
}

/// Legacy lists stored as one JSON document per user.
pub struct SqliteLegacyStore {
    db: Connection,
}

impl SqliteLegacyStore {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LegacyStore for SqliteLegacyStore {
    async fn load(&self, user_id: &str) -> Result<Vec<LegacyEvent>, Error> {
        let user_id = user_id.to_owned();
        let data: Option<String> = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare("SELECT data FROM legacy_event_cache WHERE user_id = ?")?;
                let data = stmt
                    .query_map([&user_id], |row| row.get::<_, String>(0))?
                    .next()
                    .transpose()?;
                Ok(data)
            })
            .await?;

        match data {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(vec![]),
        }
    }

    async fn replace(&self, user_id: &str, events: &[LegacyEvent]) -> Result<(), Error> {
        let user_id = user_id.to_owned();
        let data = serde_json::to_string(events)?;
        self.db
            .call(move |conn| {
                conn.execute(
                    "REPLACE INTO legacy_event_cache (user_id, data) VALUES (?, ?)",
                    [&user_id, &data],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn clear(&self, user_id: &str) -> Result<(), Error> {
        let user_id = user_id.to_owned();
        self.db
            .call(move |conn| {
                conn.execute("DELETE FROM legacy_event_cache WHERE user_id = ?", [&user_id])?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

/// Move `user_id`'s legacy events into the event store, preserving ids.
/// The legacy list is only cleared after every event was written, so a
/// failed run, including one where an id is already taken by another
/// user, can be retried. Returns the number of events imported.
pub async fn migrate_legacy_events(
    db: &Connection,
    legacy: &dyn LegacyStore,
    user_id: &str,
) -> Result<usize, Error> {
    let events = legacy.load(user_id).await?;
    if events.is_empty() {
        return Ok(0);
    }

    let count = events.len();
    let anchors = events.into_iter().map(AnchorEvent::from).collect();
    let written = upsert_anchor_events(db, anchors, user_id).await?;
    if written != count {
        bail!(
            "Imported {} of {} legacy events for user {}",
            written,
            count,
            user_id
        );
    }
    legacy.clear(user_id).await?;

    tracing::info!("Imported {} legacy events for user {}", written, user_id);
    Ok(written)
}
