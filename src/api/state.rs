use std::sync::Arc;

use tokio_rusqlite::Connection;

use crate::calendar::TermCalendar;
use crate::core::AppConfig;

pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    // Loaded once at startup and never mutated
    pub terms: Arc<TermCalendar>,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig, terms: TermCalendar) -> Self {
        Self {
            db,
            config,
            terms: Arc::new(terms),
        }
    }
}
