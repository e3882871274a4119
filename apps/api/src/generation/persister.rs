//! Assembly and persistence of generated interviews.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::generation::covers::random_cover;
use crate::generation::validator::InterviewRequest;
use crate::models::interview::Interview;

/// Splits a comma-separated tech stack into trimmed segments.
/// An empty input yields an empty list, not `[""]`.
pub fn split_techstack(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

/// Builds the interview entity from the validated request and the generated
/// questions. A fresh id is assigned here; resubmitting an equivalent request
/// produces a distinct record — there is no idempotency key.
pub fn assemble_interview(request: &InterviewRequest, questions: Vec<String>) -> Interview {
    Interview {
        id: Uuid::new_v4(),
        role: request.role.clone(),
        interview_type: request.interview_type.clone(),
        level: request.level.clone(),
        techstack: Json(split_techstack(&request.techstack)),
        questions: Json(questions),
        user_id: request.user_id.clone(),
        finalized: true,
        cover_image: random_cover().to_string(),
        created_at: Utc::now(),
    }
}

/// Single-row insert; the full entity is returned to the caller so the route
/// can echo it back without a second read.
pub async fn persist_interview(
    db: &PgPool,
    request: &InterviewRequest,
    questions: Vec<String>,
) -> Result<Interview, sqlx::Error> {
    let interview = assemble_interview(request, questions);

    sqlx::query(
        r#"INSERT INTO interviews
               (id, role, "type", level, techstack, questions, user_id, finalized, cover_image, created_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
    )
    .bind(interview.id)
    .bind(&interview.role)
    .bind(&interview.interview_type)
    .bind(&interview.level)
    .bind(&interview.techstack)
    .bind(&interview.questions)
    .bind(&interview.user_id)
    .bind(interview.finalized)
    .bind(&interview.cover_image)
    .bind(interview.created_at)
    .execute(db)
    .await?;

    Ok(interview)
}
