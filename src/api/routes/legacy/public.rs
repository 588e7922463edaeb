//! Public types for the legacy event API
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LegacyQuery {
    pub user_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct MigrateResponse {
    pub migrated: usize,
}
