//! Resume generation: raw text in, a complete [`ResumeDocument`] out.
//!
//! Flow: build schema → structured extraction call → strict deserialize.
//!
//! The result is all or nothing. A payload that does not deserialize in full
//! is rejected; no field is salvaged from it.

use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::{RESUME_EXTRACTION_INSTRUCTION, RESUME_TOOL_NAME};
use crate::generation::schema::resume_schema;
use crate::llm_client::{strip_json_fences, LlmError, StructuredExtractor, StructuredRequest};
use crate::models::ResumeDocument;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no data returned")]
    NoData,

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("extraction service failed: {0}")]
    Service(#[from] LlmError),
}

/// Runs one generation. `raw_text` must be non-blank; callers check that before
/// starting a generation at all.
pub async fn generate_resume(
    extractor: &dyn StructuredExtractor,
    raw_text: &str,
) -> Result<ResumeDocument, GenerationError> {
    debug_assert!(!raw_text.trim().is_empty(), "generation needs source text");

    let schema = resume_schema();
    let payload = extractor
        .extract_structured(StructuredRequest {
            tool_name: RESUME_TOOL_NAME,
            instruction: RESUME_EXTRACTION_INSTRUCTION,
            source_text: raw_text,
            schema: &schema,
        })
        .await?;

    let Some(payload) = payload else {
        warn!("Extraction service returned no payload");
        return Err(GenerationError::NoData);
    };

    let document: ResumeDocument = serde_json::from_str(strip_json_fences(&payload))?;

    info!(
        "Generated resume: {} education, {} experience, {} projects",
        document.education.len(),
        document.experience.len(),
        document.projects.len()
    );

    Ok(document)
}
