// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! bearer authentication, and classification of API errors. Each call is a
//! single attempt: the service bounds every request to one upstream call.

use std::time::Duration;

use mindcheck_core::MindcheckError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// Error code OpenAI reports when the account has no remaining credit.
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

/// HTTP client for OpenAI-compatible API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - Bearer token for authentication
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    /// * `model` - Default model identifier
    /// * `timeout` - Whole-request timeout
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: String,
        timeout: Duration,
    ) -> Result<Self, MindcheckError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            MindcheckError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MindcheckError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            endpoint: completions_endpoint(base_url),
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Returns the full chat-completions URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a completion request and returns the parsed response.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, MindcheckError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| MindcheckError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        let body = response.text().await.map_err(|e| MindcheckError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| MindcheckError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Joins the base URL and the chat-completions path.
fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Maps a non-success response to a [`MindcheckError`].
///
/// Quota exhaustion is recognised by the `insufficient_quota` code or type,
/// or by a message that mentions the quota. Plain rate limiting (429
/// without a quota marker) stays a generic provider error.
fn classify_error(status: reqwest::StatusCode, body: &str) -> MindcheckError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => {
            let detail = api_err.error;
            let kind = detail
                .code_str()
                .or(detail.type_.as_deref())
                .unwrap_or("unknown_error")
                .to_string();
            let message = format!("OpenAI API error ({kind}): {}", detail.message);

            let quota = detail.code_str() == Some(INSUFFICIENT_QUOTA)
                || detail.type_.as_deref() == Some(INSUFFICIENT_QUOTA)
                || MindcheckError::is_quota_message(&detail.message);
            if quota {
                MindcheckError::QuotaExhausted { message }
            } else {
                MindcheckError::provider(message)
            }
        }
        Err(_) => MindcheckError::provider(format!("API returned {status}: {body}")),
    }
}
