use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::session::SessionManager;
use crate::llm_client::QuestionGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Cloned per request; every member is internally synchronized, so no request
/// ever shares mutable state with another.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable question generator. Production uses the Gemini client;
    /// tests swap in stubs.
    pub llm: Arc<dyn QuestionGenerator>,
    pub sessions: SessionManager,
}
