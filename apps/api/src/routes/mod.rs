pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::preview::handlers as preview;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session", get(session::handle_get_session))
        .route("/api/v1/session/input", put(session::handle_set_input))
        .route("/api/v1/session/upload", post(session::handle_upload))
        .route("/api/v1/session/generate", post(session::handle_generate))
        .route("/api/v1/session/reset", post(session::handle_reset))
        // Editor
        .route("/api/v1/resume", get(editor::handle_get_resume))
        .route("/api/v1/resume/personal", patch(editor::handle_set_personal))
        .route("/api/v1/resume/skills", patch(editor::handle_set_skills))
        .route(
            "/api/v1/resume/:section/entries",
            post(editor::handle_add_entry),
        )
        .route(
            "/api/v1/resume/:section/entries/:index",
            patch(editor::handle_update_entry).delete(editor::handle_remove_entry),
        )
        .route(
            "/api/v1/resume/:section/entries/:index/bullets",
            post(editor::handle_add_bullet),
        )
        .route(
            "/api/v1/resume/:section/entries/:index/bullets/:bullet",
            put(editor::handle_update_bullet).delete(editor::handle_remove_bullet),
        )
        // Preview
        .route("/api/v1/resume/preview", get(preview::handle_preview))
        .route("/api/v1/resume/print", get(preview::handle_print))
        .layer(body_limit)
        .with_state(state)
}
