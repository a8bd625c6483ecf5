// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote inference gateway.
//!
//! Wraps a [`ProviderAdapter`] with the assessment and chat contracts:
//! prompt construction, sampling parameters, strict parsing and local
//! schema validation of assessment output, and failure classification.

use std::sync::Arc;

use mindcheck_core::traits::{PluginAdapter, ProviderAdapter};
use mindcheck_core::types::{
    AnsweredItem, ChatMessage, ChatReply, CompletionRequest, ResponseFormat, RiskAssessment,
};
use mindcheck_core::MindcheckError;
use tracing::{debug, warn};

use crate::prompt;

/// Sampling parameters for the two remote operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceSettings {
    /// Low temperature keeps assessments consistent across calls.
    pub assessment_temperature: f32,
    /// Higher temperature varies the conversational tone.
    pub chat_temperature: f32,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            assessment_temperature: 0.2,
            chat_temperature: 0.7,
        }
    }
}

/// Invokes the remote completion capability under the service's contracts.
#[derive(Clone)]
pub struct InferenceGateway {
    provider: Arc<dyn ProviderAdapter>,
    settings: InferenceSettings,
}

impl std::fmt::Debug for InferenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceGateway")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl InferenceGateway {
    pub fn new(provider: Arc<dyn ProviderAdapter>, settings: InferenceSettings) -> Self {
        Self { provider, settings }
    }

    /// Asks the model for a risk assessment of `answers`.
    ///
    /// The completion must parse as JSON and match the [`RiskAssessment`]
    /// shape; anything else is [`MindcheckError::MalformedOutput`].
    pub async fn assess(&self, answers: &[AnsweredItem]) -> Result<RiskAssessment, MindcheckError> {
        let request = CompletionRequest {
            messages: prompt::assessment_messages(answers)?,
            temperature: self.settings.assessment_temperature,
            response_format: ResponseFormat::JsonObject,
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(classify_failure)?;
        debug!(id = %response.id, model = %response.model, "assessment completion received");

        parse_assessment(&response.content).inspect_err(|err| {
            if let MindcheckError::MalformedOutput { message, raw } = err {
                warn!(error = %message, raw = %raw, "discarding malformed assessment output");
            }
        })
    }

    /// Asks the model for a reply to `conversation`.
    ///
    /// An empty completion is returned as an empty reply, not an error.
    pub async fn chat(&self, conversation: &[ChatMessage]) -> Result<ChatReply, MindcheckError> {
        let request = CompletionRequest {
            messages: prompt::chat_messages(conversation),
            temperature: self.settings.chat_temperature,
            response_format: ResponseFormat::Text,
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(classify_failure)?;
        debug!(id = %response.id, model = %response.model, "chat completion received");

        Ok(ChatReply {
            reply: response.content,
        })
    }
}

/// Parses completion text into a [`RiskAssessment`].
///
/// Syntax errors and schema violations (missing keys, unknown risk levels,
/// wrong value types) are both reported as malformed output.
pub fn parse_assessment(raw: &str) -> Result<RiskAssessment, MindcheckError> {
    let malformed = |message: String| MindcheckError::MalformedOutput {
        message,
        raw: raw.to_string(),
    };

    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| malformed(format!("completion is not valid JSON: {e}")))?;

    serde_json::from_value(value)
        .map_err(|e| malformed(format!("completion does not match the assessment schema: {e}")))
}

/// Normalises provider failures at the gateway boundary.
///
/// Providers that cannot tell quota exhaustion apart structurally still
/// report it in the message; those are reclassified here.
fn classify_failure(err: MindcheckError) -> MindcheckError {
    match err {
        MindcheckError::Provider { message, .. } if MindcheckError::is_quota_message(&message) => {
            MindcheckError::QuotaExhausted { message }
        }
        other => other,
    }
}
