//! Persistence of anchor events
//!
//! Only anchors are stored. Every query is scoped by the owning user so
//! one user can never read, overwrite or delete another user's rows.
use anyhow::{Error, Result, bail};
use rusqlite::Row;
use tokio_rusqlite::{Connection, params};

use super::event::{AnchorEvent, EventDetails, NotificationPrefs, validate_anchor_id};

const UPSERT_SQL: &str = r#"
    INSERT INTO calendar_event (
        id, user_id, title, date, time, end_time, type, category,
        description, location, course_code, recurrence,
        notify_enabled, notify_same_day, notify_1_day, notify_7_days
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        date = excluded.date,
        time = excluded.time,
        end_time = excluded.end_time,
        type = excluded.type,
        category = excluded.category,
        description = excluded.description,
        location = excluded.location,
        course_code = excluded.course_code,
        recurrence = excluded.recurrence,
        notify_enabled = excluded.notify_enabled,
        notify_same_day = excluded.notify_same_day,
        notify_1_day = excluded.notify_1_day,
        notify_7_days = excluded.notify_7_days
    WHERE calendar_event.user_id = excluded.user_id
"#;

fn upsert_row(
    conn: &rusqlite::Connection,
    event: &AnchorEvent,
    user_id: &str,
) -> Result<usize, rusqlite::Error> {
    let AnchorEvent { id, date, details } = event;
    let EventDetails {
        title,
        time,
        end_time,
        kind,
        category,
        description,
        location,
        course_code,
        recurrence,
        notifications,
    } = details;

    conn.execute(
        UPSERT_SQL,
        params![
            id,
            user_id,
            title,
            date,
            time,
            end_time,
            kind,
            category,
            description,
            location,
            course_code,
            recurrence,
            notifications.enabled,
            notifications.same_day,
            notifications.one_day,
            notifications.seven_days,
        ],
    )
}

fn event_from_row(row: &Row) -> Result<AnchorEvent, rusqlite::Error> {
    Ok(AnchorEvent {
        id: row.get(0)?,
        date: row.get(2)?,
        details: EventDetails {
            title: row.get(1)?,
            time: row.get(3)?,
            end_time: row.get(4)?,
            kind: row.get(5)?,
            category: row.get(6)?,
            description: row.get(7)?,
            location: row.get(8)?,
            course_code: row.get(9)?,
            recurrence: row.get(10)?,
            notifications: NotificationPrefs {
                enabled: row.get(11)?,
                same_day: row.get(12)?,
                one_day: row.get(13)?,
                seven_days: row.get(14)?,
            },
        },
    })
}

/// All anchors owned by `user_id` in ascending anchor date order.
pub async fn list_anchor_events(db: &Connection, user_id: &str) -> Result<Vec<AnchorEvent>, Error> {
    let user_id = user_id.to_owned();
    let events = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, title, date, time, end_time, type, category,
                       description, location, course_code, recurrence,
                       notify_enabled, notify_same_day, notify_1_day, notify_7_days
                FROM calendar_event
                WHERE user_id = ?1
                ORDER BY date ASC, time ASC, id ASC
                "#,
            )?;
            let rows = stmt
                .query_map([&user_id], event_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await?;
    Ok(events)
}

/// Insert `event` or fully replace the row with the same id. Returns
/// the number of rows written, which is 0 when the id belongs to
/// another user.
pub async fn upsert_anchor_event(
    db: &Connection,
    event: &AnchorEvent,
    user_id: &str,
) -> Result<usize, Error> {
    validate_anchor_id(&event.id)?;
    let event = event.clone();
    let user_id = user_id.to_owned();
    let result = db
        .call(move |conn| Ok(upsert_row(conn, &event, &user_id)?))
        .await?;
    Ok(result)
}

/// Upsert many events in a single transaction. Either every row is
/// written or none are: if any id belongs to another user the whole
/// batch is rolled back and an error is returned.
pub async fn upsert_anchor_events(
    db: &Connection,
    events: Vec<AnchorEvent>,
    user_id: &str,
) -> Result<usize, Error> {
    for event in &events {
        validate_anchor_id(&event.id)?;
    }

    let user_id = user_id.to_owned();
    let (written, conflicts) = db
        .call(move |conn| {
            let tx = conn.transaction()?;
            let mut written = 0;
            let mut conflicts = vec![];
            for event in &events {
                match upsert_row(&tx, event, &user_id)? {
                    0 => conflicts.push(event.id.clone()),
                    n => written += n,
                }
            }
            if conflicts.is_empty() {
                tx.commit()?;
            } else {
                tx.rollback()?;
            }
            Ok((written, conflicts))
        })
        .await?;

    if !conflicts.is_empty() {
        bail!(
            "Event ids already owned by another user: {}",
            conflicts.join(", ")
        );
    }
    Ok(written)
}

/// Delete the event `event_id` if `user_id` owns it. Deleting a missing
/// row or another user's row is a no-op returning 0.
pub async fn delete_anchor_event(
    db: &Connection,
    event_id: &str,
    user_id: &str,
) -> Result<usize, Error> {
    let event_id = event_id.to_owned();
    let user_id = user_id.to_owned();
    let result = db
        .call(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM calendar_event WHERE id = ?1 AND user_id = ?2",
                [&event_id, &user_id],
            )?;
            Ok(deleted)
        })
        .await?;
    Ok(result)
}
