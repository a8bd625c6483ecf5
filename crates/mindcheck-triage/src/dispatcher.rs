// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request arbitration between the deterministic and remote paths.
//!
//! Each entry point validates its input, then either answers locally (no
//! remote capability configured) or invokes the inference gateway once.
//! Quota exhaustion degrades to the local path with the same input; every
//! other remote failure is surfaced. Nothing is retried.

use std::sync::Arc;

use mindcheck_core::traits::ProviderAdapter;
use mindcheck_core::types::{AnsweredItem, ChatMessage, ChatReply, ResponsePath, RiskAssessment};
use mindcheck_core::MindcheckError;
use tracing::{debug, info, warn};

use crate::inference::{InferenceGateway, InferenceSettings};
use crate::{responder, scoring};

/// A successful response together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched<T> {
    pub value: T,
    pub path: ResponsePath,
}

impl<T> Dispatched<T> {
    fn new(value: T, path: ResponsePath) -> Self {
        Self { value, path }
    }

    /// Discards the path, keeping only the response payload.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Chooses the response path for assessment and chat requests.
///
/// The remote capability is injected once at construction and shared
/// immutably by every request; the dispatcher holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    gateway: Option<InferenceGateway>,
}

impl Dispatcher {
    /// A dispatcher that always answers deterministically.
    pub fn deterministic() -> Self {
        Self { gateway: None }
    }

    /// A dispatcher that prefers the given provider.
    pub fn with_provider(provider: Arc<dyn ProviderAdapter>, settings: InferenceSettings) -> Self {
        Self {
            gateway: Some(InferenceGateway::new(provider, settings)),
        }
    }

    /// Builds a dispatcher from an optional provider. `None` means no
    /// credential was configured.
    pub fn new(provider: Option<Arc<dyn ProviderAdapter>>, settings: InferenceSettings) -> Self {
        match provider {
            Some(provider) => Self::with_provider(provider, settings),
            None => Self::deterministic(),
        }
    }

    /// Whether requests are routed to the remote capability first.
    pub fn remote_enabled(&self) -> bool {
        self.gateway.is_some()
    }

    /// Produces a risk assessment for a questionnaire answer set.
    pub async fn assess(
        &self,
        answers: &[AnsweredItem],
    ) -> Result<Dispatched<RiskAssessment>, MindcheckError> {
        if answers.is_empty() {
            return Err(MindcheckError::InvalidInput(
                "answers must be a non-empty list".into(),
            ));
        }

        let Some(gateway) = &self.gateway else {
            debug!(answers = answers.len(), "no remote capability, scoring locally");
            return Ok(Dispatched::new(
                scoring::assess(answers),
                ResponsePath::Deterministic,
            ));
        };

        arbitrate("assessment", gateway.assess(answers).await, || {
            scoring::assess(answers)
        })
    }

    /// Produces a reply to a conversation.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Dispatched<ChatReply>, MindcheckError> {
        if messages.is_empty() {
            return Err(MindcheckError::InvalidInput(
                "messages must be a non-empty list".into(),
            ));
        }

        let Some(gateway) = &self.gateway else {
            debug!(messages = messages.len(), "no remote capability, replying locally");
            return Ok(Dispatched::new(
                responder::respond(messages),
                ResponsePath::Deterministic,
            ));
        };

        arbitrate("chat", gateway.chat(messages).await, || {
            responder::respond(messages)
        })
    }
}

/// Resolves a remote outcome into a final response.
fn arbitrate<T>(
    operation: &'static str,
    remote: Result<T, MindcheckError>,
    local: impl FnOnce() -> T,
) -> Result<Dispatched<T>, MindcheckError> {
    match remote {
        Ok(value) => Ok(Dispatched::new(value, ResponsePath::Remote)),
        Err(MindcheckError::QuotaExhausted { message }) => {
            info!(operation, reason = %message, "provider quota exhausted, falling back to deterministic path");
            Ok(Dispatched::new(local(), ResponsePath::QuotaFallback))
        }
        Err(err) => {
            warn!(operation, class = %err.failure_class(), error = %err, "remote inference failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindcheck_core::types::{FailureClass, RiskLevel};
    use mindcheck_test_utils::{MockOutcome, MockProvider};
    use tracing_test::traced_test;

    const VALID: &str = r#"{"summary":"remote","risks":{"stress":"low","anxiety":"high","depression":"moderate"},"recommendations":"remote recs"}"#;

    fn remote(provider: &MockProvider) -> Dispatcher {
        Dispatcher::with_provider(Arc::new(provider.clone()), InferenceSettings::default())
    }

    fn full_answers(score: i64) -> Vec<AnsweredItem> {
        vec![AnsweredItem::scored(score); 21]
    }

    #[tokio::test]
    async fn empty_answers_rejected_before_remote_call() {
        let provider = MockProvider::new();
        let err = remote(&provider).assess(&[]).await.unwrap_err();
        assert_eq!(err.failure_class(), FailureClass::InvalidInput);
        assert_eq!(provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn empty_messages_rejected_before_remote_call() {
        let provider = MockProvider::new();
        let err = remote(&provider).chat(&[]).await.unwrap_err();
        assert!(matches!(err, MindcheckError::InvalidInput(_)));
        assert_eq!(provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn deterministic_dispatcher_scores_locally() {
        let dispatcher = Dispatcher::deterministic();
        assert!(!dispatcher.remote_enabled());

        let result = dispatcher.assess(&full_answers(3)).await.unwrap();
        assert_eq!(result.path, ResponsePath::Deterministic);
        assert_eq!(result.value, scoring::assess(&full_answers(3)));
        assert_eq!(result.value.risks.stress, RiskLevel::High);
    }

    #[tokio::test]
    async fn deterministic_dispatcher_replies_locally() {
        let dispatcher = Dispatcher::new(None, InferenceSettings::default());
        let result = dispatcher
            .chat(&[ChatMessage::user("So much stress at work")])
            .await
            .unwrap();
        assert_eq!(result.path, ResponsePath::Deterministic);
        assert_eq!(result.value.reply, responder::BREATHING_REPLY);
    }

    #[tokio::test]
    async fn remote_success_is_returned_as_is() {
        let provider = MockProvider::with_responses(vec![VALID.to_string()]);
        let dispatcher = remote(&provider);
        assert!(dispatcher.remote_enabled());

        let result = dispatcher.assess(&full_answers(0)).await.unwrap();
        assert_eq!(result.path, ResponsePath::Remote);
        assert_eq!(result.value.summary, "remote");
        assert_eq!(result.value.risks.anxiety, RiskLevel::High);
        assert_eq!(provider.call_count().await, 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn quota_exhaustion_falls_back_for_assessment() {
        let provider = MockProvider::with_outcomes(vec![MockOutcome::QuotaExhausted]);
        let answers = full_answers(1);

        let result = remote(&provider).assess(&answers).await.unwrap();
        assert_eq!(result.path, ResponsePath::QuotaFallback);
        assert_eq!(result.value, scoring::assess(&answers));
        assert_eq!(provider.call_count().await, 1);
        assert!(logs_contain("falling back to deterministic path"));
    }

    #[tokio::test]
    async fn quota_exhaustion_falls_back_for_chat() {
        let provider = MockProvider::with_outcomes(vec![MockOutcome::ProviderError(
            "You exceeded your current quota".into(),
        )]);
        let messages = vec![ChatMessage::user("I feel hopeless")];

        let result = remote(&provider).chat(&messages).await.unwrap();
        assert_eq!(result.path, ResponsePath::QuotaFallback);
        assert_eq!(result.value, responder::respond(&messages));
    }

    #[tokio::test]
    #[traced_test]
    async fn malformed_output_is_surfaced() {
        let provider = MockProvider::with_responses(vec![r#"{"summary":"only"}"#.to_string()]);
        let err = remote(&provider).assess(&full_answers(2)).await.unwrap_err();
        assert_eq!(err.failure_class(), FailureClass::UpstreamMalformedOutput);
        assert_eq!(provider.call_count().await, 1);
        assert!(logs_contain("remote inference failed"));
    }

    #[tokio::test]
    async fn other_failures_are_surfaced_without_retry() {
        let provider = MockProvider::with_outcomes(vec![
            MockOutcome::ProviderError("HTTP 503 Service Unavailable".into()),
            MockOutcome::Text("should never be requested".into()),
        ]);
        let err = remote(&provider)
            .chat(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert_eq!(err.failure_class(), FailureClass::UpstreamOther);
        assert!(err.to_string().contains("503"));
        assert_eq!(provider.call_count().await, 1);
    }

    #[tokio::test]
    async fn into_value_discards_path() {
        let reply = Dispatcher::deterministic()
            .chat(&[ChatMessage::user("hi")])
            .await
            .unwrap()
            .into_value();
        assert_eq!(reply.reply, responder::LISTENING_REPLY);
    }
}
