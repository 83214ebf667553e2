// Resume generation: free-form source text to a structured ResumeDocument.
// Service calls go through llm_client.

pub mod generator;
pub mod prompts;
pub mod schema;

pub use generator::{generate_resume, GenerationError};
