//! Client for the hosted extraction service (Anthropic Messages API).
//!
//! Structured output is requested by forcing a single tool call whose input
//! schema is the caller's JSON schema. One attempt per request; the HTTP
//! client carries the configured timeout.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Structured extraction seam
// ────────────────────────────────────────────────────────────────────────────

/// One structured-extraction call: an instruction, the source text, and the
/// JSON schema the answer must follow.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    pub tool_name: &'a str,
    pub instruction: &'a str,
    pub source_text: &'a str,
    pub schema: &'a Value,
}

/// Anything that can turn text into a serialized JSON payload under a schema.
///
/// `Ok(None)` means the service answered but carried no payload.
/// Carried in `AppState` as `Arc<dyn StructuredExtractor>`.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn extract_structured(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<Option<String>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDefinition<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolDefinition<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Value,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolChoice<'a> {
    Tool { name: &'a str },
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    /// The arguments the model passed to the named tool, if it called it.
    pub fn tool_input(&self, tool_name: &str) -> Option<&Value> {
        self.content
            .iter()
            .find(|b| b.block_type == "tool_use" && b.name.as_deref() == Some(tool_name))
            .and_then(|b| b.input.as_ref())
    }

    /// The structured payload as a JSON string: the forced tool call when
    /// present, otherwise any non-blank text block.
    pub fn payload(&self, tool_name: &str) -> Option<String> {
        match self.tool_input(tool_name) {
            Some(Value::Null) | None => self
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            Some(input) => Some(input.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client. Wraps the Anthropic Messages API and forces a tool
/// call so the reply follows the caller's schema.
///
/// Calls are made once. A failure goes straight back to the caller, which
/// reports it to the user instead of retrying.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    async fn call(&self, request_body: &AnthropicRequest<'_>) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl StructuredExtractor for LlmClient {
    async fn extract_structured(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<Option<String>, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: prompts::STRUCTURED_OUTPUT_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: format!(
                    "{}\n    Source text: {}",
                    request.instruction, request.source_text
                ),
            }],
            tools: vec![ToolDefinition {
                name: request.tool_name,
                description: prompts::TOOL_DESCRIPTION,
                input_schema: request.schema,
            }],
            tool_choice: Some(ToolChoice::Tool {
                name: request.tool_name,
            }),
        };

        let response = self.call(&request_body).await?;
        Ok(response.payload(request.tool_name))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
