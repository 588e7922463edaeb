use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use crate::calendar::{expand_all, list_anchor_events, sort_chronologically, within};
use crate::core::AppConfig;
use crate::core::db::async_db;

pub async fn run(
    user_id: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    config: &AppConfig,
) -> Result<()> {
    let terms = config.term_calendar()?;
    let db = async_db(&config.db_path).await?;

    let events = list_anchor_events(&db, user_id).await?;
    let mut occurrences = within(expand_all(&events, &terms), from, to);
    sort_chronologically(&mut occurrences);

    println!(
        "{}",
        json!({
            "user_id": user_id,
            "anchors": events.len(),
            "occurrences": occurrences,
        })
    );
    Ok(())
}
