// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the `/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,

    /// Conversation messages, in order.
    pub messages: Vec<ApiMessage>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Structured output mode. Omitted for plain text completions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ApiResponseFormat>,
}

/// A single message in the OpenAI conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Role: "system", "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

/// The `response_format` request field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponseFormat {
    /// Format type, e.g. "json_object".
    #[serde(rename = "type")]
    pub type_: String,
}

impl ApiResponseFormat {
    /// JSON mode: the model is constrained to emit a single JSON object.
    pub fn json_object() -> Self {
        Self {
            type_: "json_object".to_string(),
        }
    }
}

// --- Response types ---

/// A successful `/chat/completions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion identifier.
    pub id: String,
    /// Model that served the request.
    #[serde(default)]
    pub model: String,
    /// Candidate completions; the first one is used.
    #[serde(default)]
    pub choices: Vec<ApiChoice>,
}

impl ChatCompletionResponse {
    /// Text of the top choice, or an empty string when there is none.
    pub fn first_content(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ApiResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a choice. `content` is null for refusals
/// and tool calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

// --- Error types ---

/// Error envelope returned with non-success status codes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error details. `type` and `code` are both optional and loosely typed
/// across OpenAI-compatible servers.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ApiErrorDetail {
    /// Returns the error code when it is a string.
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_ref().and_then(|c| c.as_str())
    }
}
