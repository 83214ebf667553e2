// Shared prompt constants for the LLM client.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt for schema-bound extraction calls.
pub const STRUCTURED_OUTPUT_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST answer by calling the provided tool exactly once. \
    Fill every field from the source text only. \
    Do NOT invent employers, schools, dates or contact details. \
    Use an empty string for a field the source text does not mention.";

/// Description attached to the single forced tool.
pub const TOOL_DESCRIPTION: &str =
    "Record the extracted data. The input must match the schema exactly.";
