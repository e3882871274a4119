//! Sign-up, sign-in and current-user handlers.
//!
//! Auth outcomes are domain values, not HTTP errors: every path returns 200
//! with `{success, message}` (or the user payload for `me`), matching the
//! original server actions. Store failures are logged and converted to the
//! generic failure message for that action.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::error;

use crate::auth::session::{SessionManager, SESSION_COOKIE};
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub uid: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub authenticated: bool,
    pub data: Option<User>,
}

/// POST /api/v1/auth/sign-up
///
/// Creates the user record keyed by the auth provider's uid.
/// An existing record is never overwritten.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Json<ActionResponse> {
    match sign_up(&state.db, &request).await {
        Ok(response) => Json(response),
        Err(e) => {
            error!("Error creating user: {e}");
            Json(ActionResponse::failed(
                "Failed to create account. Please try again.",
            ))
        }
    }
}

/// Decides the sign-up outcome from the existence check.
/// An existing record short-circuits before any write.
fn sign_up_outcome(already_exists: bool) -> ActionResponse {
    if already_exists {
        ActionResponse::failed("User already exists. Please sign in.")
    } else {
        ActionResponse::ok("Account created successfully. Please sign in.")
    }
}

async fn sign_up(db: &PgPool, request: &SignUpRequest) -> Result<ActionResponse, sqlx::Error> {
    let existing = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE id = $1")
        .bind(&request.uid)
        .fetch_optional(db)
        .await?;

    let outcome = sign_up_outcome(existing.is_some());
    if !outcome.success {
        return Ok(outcome);
    }

    sqlx::query("INSERT INTO users (id, name, email) VALUES ($1, $2, $3)")
        .bind(&request.uid)
        .bind(&request.name)
        .bind(&request.email)
        .execute(db)
        .await?;

    Ok(outcome)
}

enum SignInFailure {
    UserNotFound,
    Other(anyhow::Error),
}

/// POST /api/v1/auth/sign-in
///
/// Exchanges a verified identity token for the 7-day session cookie.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignInRequest>,
) -> (CookieJar, Json<ActionResponse>) {
    match sign_in(&state, &request).await {
        Ok(cookie) => (
            jar.add(cookie),
            Json(ActionResponse::ok("Sign in successful")),
        ),
        Err(SignInFailure::UserNotFound) => (jar, Json(ActionResponse::failed("User not found"))),
        Err(SignInFailure::Other(e)) => {
            error!("Error signing in: {e}");
            (jar, Json(ActionResponse::failed("Failed to sign in")))
        }
    }
}

async fn sign_in(
    state: &AppState,
    request: &SignInRequest,
) -> Result<axum_extra::extract::cookie::Cookie<'static>, SignInFailure> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at FROM users WHERE email = $1",
    )
    .bind(&request.email)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| SignInFailure::Other(e.into()))?;

    if user.is_none() {
        return Err(SignInFailure::UserNotFound);
    }

    let identity = state
        .sessions
        .verify_identity(&request.id_token)
        .map_err(|e| SignInFailure::Other(e.into()))?;

    let token = state
        .sessions
        .issue(&identity.sub)
        .map_err(|e| SignInFailure::Other(e.into()))?;

    Ok(state.sessions.cookie(token))
}

/// GET /api/v1/auth/me
///
/// Resolves the session cookie to the current user. Absent, expired or
/// tampered sessions yield `data: null`, never an error.
pub async fn handle_me(State(state): State<AppState>, jar: CookieJar) -> Json<MeResponse> {
    let user = current_user(&state, &jar).await;
    Json(MeResponse {
        success: true,
        authenticated: user.is_some(),
        data: user,
    })
}

/// Resolves the session cookie to a user id. Purely cryptographic — no store
/// access; an absent, tampered or expired cookie yields `None`.
fn session_uid(sessions: &SessionManager, jar: &CookieJar) -> Option<String> {
    let cookie = jar.get(SESSION_COOKIE)?;
    sessions.verify(cookie.value())
}

/// Resolves the session cookie to a user, failing open to `None`.
/// The store is only consulted once [`session_uid`] produced an id.
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Option<User> {
    let uid = session_uid(&state.sessions, jar)?;

    match fetch_user(&state.db, &uid).await {
        Ok(user) => user,
        Err(e) => {
            error!("Error getting current user: {e}");
            None
        }
    }
}

async fn fetch_user(db: &PgPool, uid: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = $1")
        .bind(uid)
        .fetch_optional(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{LlmError, QuestionGenerator};
    use async_trait::async_trait;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    struct NoGenerator;

    #[async_trait]
    impl QuestionGenerator for NoGenerator {
        async fn generate_questions(&self, _prompt: &str) -> Result<Vec<String>, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn test_state() -> AppState {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .expect("lazy pool");
        AppState {
            db,
            llm: Arc::new(NoGenerator),
            sessions: SessionManager::new("session-secret", "identity-secret", false),
        }
    }

    #[test]
    fn sign_up_with_existing_uid_is_a_conflict() {
        let outcome = sign_up_outcome(true);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "User already exists. Please sign in.");
    }

    #[test]
    fn sign_up_with_new_uid_succeeds() {
        let outcome = sign_up_outcome(false);
        assert!(outcome.success);
        assert_eq!(outcome.message, "Account created successfully. Please sign in.");
    }

    #[test]
    fn absent_cookie_resolves_no_uid_before_any_lookup() {
        let sessions = SessionManager::new("session-secret", "identity-secret", false);
        assert_eq!(session_uid(&sessions, &CookieJar::new()), None);
    }

    #[test]
    fn valid_cookie_resolves_the_session_uid() {
        let sessions = SessionManager::new("session-secret", "identity-secret", false);
        let token = sessions.issue("user-1").expect("issue");
        let jar = CookieJar::new().add(sessions.cookie(token));
        assert_eq!(session_uid(&sessions, &jar), Some("user-1".to_string()));
    }

    #[test]
    fn tampered_cookie_resolves_no_uid() {
        let sessions = SessionManager::new("session-secret", "identity-secret", false);
        let token = sessions.issue("user-1").expect("issue");
        let jar = CookieJar::new().add(sessions.cookie(format!("{token}x")));
        assert_eq!(session_uid(&sessions, &jar), None);
    }

    #[tokio::test]
    async fn me_without_cookie_is_unauthenticated() {
        let Json(response) = handle_me(State(test_state()), CookieJar::new()).await;
        assert!(response.success);
        assert!(!response.authenticated);
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn me_with_tampered_cookie_is_unauthenticated() {
        let state = test_state();
        let token = state.sessions.issue("user-1").expect("issue");
        let jar = CookieJar::new().add(state.sessions.cookie(format!("{token}x")));

        let Json(response) = handle_me(State(state), jar).await;
        assert!(!response.authenticated);
        assert!(response.data.is_none());
    }
}
