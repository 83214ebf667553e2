//! Axum route handlers for the session: source text, upload, generate, reset.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::FileKind;
use crate::generation::generate_resume;
use crate::session::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub kind: FileKind,
    pub characters: usize,
    pub input: String,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// PUT /api/v1/session/input
pub async fn handle_set_input(
    State(state): State<AppState>,
    Json(req): Json<InputRequest>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.set_input(req.text);
    Json(session.snapshot())
}

/// POST /api/v1/session/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.reset();
    Json(session.snapshot())
}

/// POST /api/v1/session/generate
///
/// Sends the current source text to the extraction service and replaces the
/// resume with the result. The work runs on its own task so it completes and
/// lowers the pending flag even if the caller goes away.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let source_text = state.session.lock().await.begin_generation()?;
    info!("Generating resume from {} characters", source_text.len());

    let session = Arc::clone(&state.session);
    let llm = Arc::clone(&state.llm);
    let task = tokio::spawn(async move {
        let result = generate_resume(llm.as_ref(), &source_text)
            .await
            .map_err(AppError::from);
        let mut session = session.lock().await;
        session.finish_generation(result).map(|()| session.snapshot())
    });

    match task.await {
        Ok(outcome) => outcome.map(Json),
        Err(e) => {
            let error = AppError::Internal(anyhow::anyhow!("generation task failed: {e}"));
            Err(state.session.lock().await.fail_generation(error))
        }
    }
}

/// POST /api/v1/session/upload
///
/// Multipart body with one file part. The file's extension picks the
/// extractor; unknown extensions are read as plain text.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (file_name, bytes) = read_file_part(&mut multipart).await?;
    let kind = FileKind::from_file_name(&file_name);

    state.session.lock().await.begin_upload()?;

    let session = Arc::clone(&state.session);
    let extractor = state.extractor.clone();
    let name = file_name.clone();
    let task = tokio::spawn(async move {
        let result = extractor.extract(bytes, kind).await.map_err(AppError::from);
        if let Err(e) = &result {
            warn!("Upload of {name} failed: {e}");
        }
        let mut session = session.lock().await;
        session
            .finish_upload(result)
            .map(|()| session.snapshot().input)
    });

    let input = match task.await {
        Ok(outcome) => outcome?,
        Err(e) => {
            let error = AppError::Internal(anyhow::anyhow!("upload task failed: {e}"));
            return Err(state.session.lock().await.fail_upload(error));
        }
    };

    let characters = input.chars().count();
    info!("Read {characters} characters from {file_name} ({kind:?})");

    Ok(Json(UploadResponse {
        file_name,
        kind,
        characters,
        input,
    }))
}

async fn read_file_part(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        let Some(file_name) = field.file_name().map(String::from) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
        return Ok((file_name, bytes));
    }
    Err(AppError::Validation("No file selected.".to_string()))
}
