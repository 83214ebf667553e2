//! Axum route handlers for resume edits.
//!
//! Each handler checks the addressed indices against the current document,
//! applies one pure edit and commits the result to the session. Bad indices
//! come back as 404 and the editor is never called with them.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::operations::{
    add_bullet, add_entry, bullet_count, entry_count, remove_bullet, remove_entry,
    set_personal_field, set_skills_field, update_bullet, update_entry,
};
use crate::editor::patch::{EntryPatch, PersonalField, Section, SkillsField};
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FieldUpdate<F> {
    pub field: F,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct BulletText {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub revision: u64,
    pub document: ResumeDocument,
}

/// Runs one edit against the session's document and commits the result.
async fn apply<F>(state: &AppState, edit: F) -> Result<Json<DocumentResponse>, AppError>
where
    F: FnOnce(&ResumeDocument) -> Result<ResumeDocument, AppError>,
{
    let mut session = state.session.lock().await;
    let next = edit(session.document())?;
    session.commit(next);
    Ok(Json(DocumentResponse {
        revision: session.revision(),
        document: session.document().clone(),
    }))
}

fn check_entry(doc: &ResumeDocument, section: Section, index: usize) -> Result<(), AppError> {
    if index < entry_count(doc, section) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "No {} entry at index {index}",
            section.as_str()
        )))
    }
}

fn check_bullet(
    doc: &ResumeDocument,
    section: Section,
    index: usize,
    bullet: usize,
) -> Result<(), AppError> {
    check_entry(doc, section, index)?;
    match bullet_count(doc, section, index) {
        Some(count) if bullet < count => Ok(()),
        _ => Err(AppError::NotFound(format!(
            "No bullet {bullet} on {} entry {index}",
            section.as_str()
        ))),
    }
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<DocumentResponse> {
    let session = state.session.lock().await;
    Json(DocumentResponse {
        revision: session.revision(),
        document: session.document().clone(),
    })
}

/// PATCH /api/v1/resume/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(req): Json<FieldUpdate<PersonalField>>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| Ok(set_personal_field(doc, req.field, &req.value))).await
}

/// PATCH /api/v1/resume/skills
pub async fn handle_set_skills(
    State(state): State<AppState>,
    Json(req): Json<FieldUpdate<SkillsField>>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| Ok(set_skills_field(doc, req.field, &req.value))).await
}

/// POST /api/v1/resume/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section): Path<Section>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| Ok(add_entry(doc, section))).await
}

/// PATCH /api/v1/resume/:section/entries/:index
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((section, index)): Path<(Section, usize)>,
    Json(body): Json<Value>,
) -> Result<Json<DocumentResponse>, AppError> {
    let patch = EntryPatch::from_json(section, body).map_err(|e| {
        AppError::Validation(format!("Invalid {} fields: {e}", section.as_str()))
    })?;
    apply(&state, |doc| {
        check_entry(doc, patch.section(), index)?;
        Ok(update_entry(doc, index, &patch))
    })
    .await
}

/// DELETE /api/v1/resume/:section/entries/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((section, index)): Path<(Section, usize)>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| {
        check_entry(doc, section, index)?;
        Ok(remove_entry(doc, section, index))
    })
    .await
}

/// POST /api/v1/resume/:section/entries/:index/bullets
pub async fn handle_add_bullet(
    State(state): State<AppState>,
    Path((section, index)): Path<(Section, usize)>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| {
        check_entry(doc, section, index)?;
        Ok(add_bullet(doc, section, index))
    })
    .await
}

/// PUT /api/v1/resume/:section/entries/:index/bullets/:bullet
pub async fn handle_update_bullet(
    State(state): State<AppState>,
    Path((section, index, bullet)): Path<(Section, usize, usize)>,
    Json(req): Json<BulletText>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| {
        check_bullet(doc, section, index, bullet)?;
        Ok(update_bullet(doc, section, index, bullet, &req.text))
    })
    .await
}

/// DELETE /api/v1/resume/:section/entries/:index/bullets/:bullet
pub async fn handle_remove_bullet(
    State(state): State<AppState>,
    Path((section, index, bullet)): Path<(Section, usize, usize)>,
) -> Result<Json<DocumentResponse>, AppError> {
    apply(&state, |doc| {
        check_bullet(doc, section, index, bullet)?;
        Ok(remove_bullet(doc, section, index, bullet))
    })
    .await
}
