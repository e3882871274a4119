pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::generation::handlers as generation_handlers;
use crate::interviews::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/sign-up", post(auth_handlers::handle_sign_up))
        .route("/api/v1/auth/sign-in", post(auth_handlers::handle_sign_in))
        .route("/api/v1/auth/me", get(auth_handlers::handle_me))
        // Interviews
        .route("/api/v1/home", get(interview_handlers::handle_home))
        .route(
            "/api/v1/interviews/generate",
            get(generation_handlers::handle_generate_probe)
                .post(generation_handlers::handle_generate),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interview_handlers::handle_get_interview),
        )
        .with_state(state)
}
