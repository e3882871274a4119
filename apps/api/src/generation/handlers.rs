//! Axum route handlers for the interview generation API.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::generation::persister::persist_interview;
use crate::generation::prompts::build_interview_prompt;
use crate::generation::validator::validate_interview_request;
use crate::models::interview::Interview;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub data: Interview,
}

/// POST /api/v1/interviews/generate
///
/// Validate → build prompt → one structured generation call → one insert.
/// Validation failures return 400 with the field report; provider and store
/// failures surface as 500 with the message in `details`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = validate_interview_request(&body).map_err(AppError::Validation)?;

    let prompt = build_interview_prompt(&request);
    let questions = state.llm.generate_questions(&prompt).await?;

    let interview = persist_interview(&state.db, &request, questions).await?;

    Ok(Json(GenerateResponse {
        success: true,
        data: interview,
    }))
}

/// GET /api/v1/interviews/generate
///
/// Health probe kept from the original route.
pub async fn handle_generate_probe() -> Json<Value> {
    Json(json!({ "success": true, "data": "operational" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionManager;
    use crate::llm_client::{LlmError, QuestionGenerator};
    use async_trait::async_trait;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    struct StubGenerator;

    #[async_trait]
    impl QuestionGenerator for StubGenerator {
        async fn generate_questions(&self, _prompt: &str) -> Result<Vec<String>, LlmError> {
            Ok(vec!["What is ownership?".to_string()])
        }
    }

    fn test_state() -> AppState {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .expect("lazy pool");
        AppState {
            db,
            llm: Arc::new(StubGenerator),
            sessions: SessionManager::new("session-secret", "identity-secret", false),
        }
    }

    #[tokio::test]
    async fn invalid_body_reports_every_missing_field() {
        let result = handle_generate(State(test_state()), Json(json!({}))).await;

        let report = match result {
            Err(AppError::Validation(report)) => report,
            Err(other) => panic!("expected validation error, got {other:?}"),
            Ok(_) => panic!("expected validation error, got success"),
        };
        for field in ["role", "level", "techstack", "type", "amount", "userid"] {
            assert!(report.field_errors.contains_key(field), "field {field}");
        }
    }

    #[tokio::test]
    async fn probe_reports_operational() {
        let Json(body) = handle_generate_probe().await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"], json!("operational"));
    }
}
