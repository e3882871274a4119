use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted interview. Immutable after creation; `finalized` is always
/// true for interviews created through the generation route.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub role: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub interview_type: String,
    pub level: String,
    pub techstack: Json<Vec<String>>,
    pub questions: Json<Vec<String>>,
    pub user_id: String,
    pub finalized: bool,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}
