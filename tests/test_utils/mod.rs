//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::Arc;

use axum::{Router, body::Body};

use advisor::api::AppState;
use advisor::api::app;
use advisor::calendar::TermCalendar;
use advisor::core::AppConfig;
use advisor::core::db::{async_db, initialize_db};

/// Term catalog used by the API tests: only fall 2025 is configured and
/// the Tuesday of the reading break is a no-class date.
pub const TEST_TERMS: &str = r#"
excluded_dates = ["2025-10-14"]

[[terms]]
id = "fall_2025"
last_class_date = "2025-12-03"
year = 2025
months = [9, 12]
"#;

/// Creates a test application router backed by a fresh database in a
/// temporary directory.
pub async fn test_app() -> Router {
    let dir = tempfile::tempdir()
        .expect("Failed to create temp directory")
        .keep();
    let db_path = dir.join("db");
    std::fs::create_dir_all(&db_path).expect("Failed to create db directory");
    let db_path = db_path.to_str().unwrap().to_string();

    let db = async_db(&db_path)
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        initialize_db(conn).expect("Failed to migrate db");
        Ok(())
    })
    .await
    .unwrap();

    let app_config = AppConfig {
        db_path,
        terms_path: None,
    };
    let terms = TermCalendar::from_toml_str(TEST_TERMS).unwrap();
    let app_state = AppState::new(db, app_config, terms);
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
