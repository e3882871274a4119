//! Read-path queries against the interviews table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::Interview;

const COLUMNS: &str =
    r#"id, role, "type", level, techstack, questions, user_id, finalized, cover_image, created_at"#;

/// All interviews taken by one user, newest first.
pub async fn interviews_by_user(db: &PgPool, user_id: &str) -> Result<Vec<Interview>, sqlx::Error> {
    sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Latest finalized interviews across all users, excluding the caller's own,
/// newest first.
pub async fn latest_interviews(
    db: &PgPool,
    exclude_user: Option<&str>,
    limit: i64,
) -> Result<Vec<Interview>, sqlx::Error> {
    sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews \
         WHERE finalized AND ($1::text IS NULL OR user_id <> $1) \
         ORDER BY created_at DESC LIMIT $2"
    ))
    .bind(exclude_user)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn interview_by_id(db: &PgPool, id: Uuid) -> Result<Option<Interview>, sqlx::Error> {
    sqlx::query_as::<_, Interview>(&format!("SELECT {COLUMNS} FROM interviews WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}
