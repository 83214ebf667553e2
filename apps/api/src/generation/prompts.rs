// Generation LLM prompt templates.

/// Name of the forced tool whose input carries the resume.
pub const RESUME_TOOL_NAME: &str = "record_resume";

pub const RESUME_EXTRACTION_INSTRUCTION: &str = "Extract the following person's details \
into a structured JSON format suitable for a professional resume. \
Keep bullet points in the order they appear. \
Write dates exactly as the source states them.";
