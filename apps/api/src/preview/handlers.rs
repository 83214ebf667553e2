use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::preview::html::render_print_html;
use crate::preview::{project, Page};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub revision: u64,
    pub page: Page,
}

/// GET /api/v1/resume/preview
///
/// Re-derives the page from the current snapshot on every call.
pub async fn handle_preview(State(state): State<AppState>) -> Json<PreviewResponse> {
    let session = state.session.lock().await;
    Json(PreviewResponse {
        revision: session.revision(),
        page: project(session.document()),
    })
}

/// GET /api/v1/resume/print
pub async fn handle_print(State(state): State<AppState>) -> Html<String> {
    let page = project(state.session.lock().await.document());
    Html(render_print_html(&page))
}
