// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for Mindcheck.
//!
//! This crate implements [`ProviderAdapter`] over the chat-completions API.
//! Any server speaking that protocol (OpenAI, Azure-style proxies, local
//! inference servers) can be targeted through `openai.base_url`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use mindcheck_config::OpenAiConfig;
use mindcheck_core::error::MindcheckError;
use mindcheck_core::traits::{PluginAdapter, ProviderAdapter};
use mindcheck_core::types::{
    ChatMessage, CompletionRequest, CompletionResponse, ResponseFormat,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ApiResponseFormat, ChatCompletionRequest};

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`ProviderAdapter`].
///
/// Constructed once at startup and shared behind an `Arc`; holds no
/// per-request state.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from configuration and an already resolved API key.
    ///
    /// Use [`resolve_api_key`] to decide whether a credential exists at all.
    pub fn new(config: &OpenAiConfig, api_key: &str) -> Result<Self, MindcheckError> {
        let client = OpenAiClient::new(
            api_key,
            &config.base_url,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(
            model = config.model,
            endpoint = client.endpoint(),
            "OpenAI provider initialized"
        );

        Ok(Self { client })
    }

    /// Converts a [`CompletionRequest`] to the chat-completions wire format.
    fn to_api_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.client.default_model().to_string(),
            messages: request.messages.iter().map(to_api_message).collect(),
            temperature: request.temperature,
            response_format: match request.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(ApiResponseFormat::json_object()),
            },
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn shutdown(&self) -> Result<(), MindcheckError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MindcheckError> {
        let api_request = self.to_api_request(&request);
        let response = self.client.complete(&api_request).await?;

        Ok(CompletionResponse {
            content: response.first_content(),
            id: response.id,
            model: response.model,
        })
    }
}

/// Resolves the API key from config or environment.
///
/// Returns `None` when neither source provides a non-empty key, which puts
/// the service in deterministic-only mode.
pub fn resolve_api_key(config_key: Option<&str>) -> Option<String> {
    resolve_api_key_with(config_key, std::env::var(API_KEY_ENV).ok())
}

fn resolve_api_key_with(config_key: Option<&str>, env_key: Option<String>) -> Option<String> {
    config_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| {
            env_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        })
}

fn to_api_message(message: &ChatMessage) -> ApiMessage {
    ApiMessage {
        role: message.role.to_string(),
        content: message.content.clone(),
    }
}
