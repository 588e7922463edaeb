use std::env;

use anyhow::Result;

use crate::calendar::TermCalendar;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: String,
    // When unset the compiled-in term catalog is used
    pub terms_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("ADVISOR_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let terms_path = env::var("ADVISOR_TERMS_PATH").ok();

        Self {
            db_path,
            terms_path,
        }
    }
}

impl AppConfig {
    /// Load the term catalog this config points at.
    pub fn term_calendar(&self) -> Result<TermCalendar> {
        match &self.terms_path {
            Some(path) => {
                tracing::info!("Loading term catalog from {}", path);
                TermCalendar::from_toml_file(path)
            }
            None => Ok(TermCalendar::default()),
        }
    }
}
