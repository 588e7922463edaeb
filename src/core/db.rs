//! SQLite connection setup and schema management
use std::path::Path;

use anyhow::Result;
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

const DB_FILE_NAME: &str = "advisor.sqlite";

/// Ordered schema migrations. The index of each entry plus one is the
/// `user_version` the database is at after applying it.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS calendar_event (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        title TEXT NOT NULL,
        date TEXT NOT NULL,
        time TEXT,
        end_time TEXT,
        type TEXT NOT NULL DEFAULT 'personal',
        category TEXT,
        description TEXT,
        location TEXT,
        course_code TEXT,
        recurrence TEXT,
        notify_enabled INTEGER NOT NULL DEFAULT 0,
        notify_same_day INTEGER NOT NULL DEFAULT 0,
        notify_1_day INTEGER NOT NULL DEFAULT 0,
        notify_7_days INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS calendar_event_user_date
        ON calendar_event (user_id, date);
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS legacy_event_cache (
        user_id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    "#,
];

/// Open an async connection to the database stored in `db_dir`.
pub async fn async_db(db_dir: &str) -> Result<Connection> {
    let path = Path::new(db_dir).join(DB_FILE_NAME);
    let db = Connection::open(path).await?;
    Ok(db)
}

/// Create the schema from scratch. Safe to run against an existing
/// database since every statement is `IF NOT EXISTS`.
pub fn initialize_db(conn: &mut SyncConnection) -> Result<(), rusqlite::Error> {
    migrate_db(conn)
}

/// Apply any migrations the database has not seen yet.
pub fn migrate_db(conn: &mut SyncConnection) -> Result<(), rusqlite::Error> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    let latest = MIGRATIONS.len() as i64;
    if current >= latest {
        if current > latest {
            tracing::warn!(
                "Database is at schema version {} which is newer than {}",
                current,
                latest
            );
        }
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (idx, migration) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        tracing::debug!("Applying db migration {}", idx + 1);
        tx.execute_batch(migration)?;
    }
    tx.pragma_update(None, "user_version", latest)?;
    tx.commit()?;

    Ok(())
}
