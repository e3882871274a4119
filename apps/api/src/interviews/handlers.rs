//! Handlers for the interview read path: the home view and single-interview
//! lookup.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::auth::handlers::current_user;
use crate::errors::AppError;
use crate::interviews::queries;
use crate::models::interview::Interview;
use crate::models::user::User;
use crate::state::AppState;

const LATEST_INTERVIEWS_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub success: bool,
    pub user: Option<User>,
    pub user_interviews: Vec<Interview>,
    pub latest_interviews: Vec<Interview>,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub success: bool,
    pub data: Interview,
}

/// GET /api/v1/home
///
/// Resolves the (optional) current user, then issues the two home-page reads
/// concurrently. A failed read renders as an empty list; both reads finish
/// before the response is built.
pub async fn handle_home(State(state): State<AppState>, jar: CookieJar) -> Json<HomeResponse> {
    let user = current_user(&state, &jar).await;
    let uid = user.as_ref().map(|u| u.id.clone());

    let (user_interviews, latest_interviews) = tokio::join!(
        async {
            match uid.as_deref() {
                Some(id) => queries::interviews_by_user(&state.db, id).await,
                None => Ok(Vec::new()),
            }
        },
        queries::latest_interviews(&state.db, uid.as_deref(), LATEST_INTERVIEWS_LIMIT),
    );

    Json(HomeResponse {
        success: true,
        user,
        user_interviews: or_empty(user_interviews, "user interviews"),
        latest_interviews: or_empty(latest_interviews, "latest interviews"),
    })
}

fn or_empty(result: Result<Vec<Interview>, sqlx::Error>, what: &str) -> Vec<Interview> {
    result.unwrap_or_else(|e| {
        warn!("{what} query failed, rendering empty: {e}");
        Vec::new()
    })
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewResponse>, AppError> {
    let interview = queries::interview_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    Ok(Json(InterviewResponse {
        success: true,
        data: interview,
    }))
}
