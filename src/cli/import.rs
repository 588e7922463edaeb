use anyhow::Result;

use crate::calendar::{SqliteLegacyStore, migrate_legacy_events};
use crate::core::db::async_db;

pub async fn run(user_id: &str, db_path: &str) -> Result<()> {
    let db = async_db(db_path).await?;
    let legacy = SqliteLegacyStore::new(db.clone());

    println!("Importing legacy events for {}...", user_id);
    let migrated = migrate_legacy_events(&db, &legacy, user_id).await?;
    println!("Imported {} events", migrated);

    Ok(())
}
