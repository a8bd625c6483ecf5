// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with scripted outcomes and
//! records every request it receives, so tests can assert both what the
//! remote path returned and whether it was touched at all.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mindcheck_core::traits::adapter::PluginAdapter;
use mindcheck_core::traits::provider::ProviderAdapter;
use mindcheck_core::types::{CompletionRequest, CompletionResponse};
use mindcheck_core::MindcheckError;

/// A scripted result for one `complete` call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed with this completion text.
    Text(String),
    /// Fail with [`MindcheckError::QuotaExhausted`].
    QuotaExhausted,
    /// Fail with a generic [`MindcheckError::Provider`] carrying this message.
    ProviderError(String),
}

impl MockOutcome {
    fn into_result(self, model: &str) -> Result<CompletionResponse, MindcheckError> {
        match self {
            Self::Text(content) => Ok(CompletionResponse {
                id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
                content,
                model: model.to_string(),
            }),
            Self::QuotaExhausted => Err(MindcheckError::QuotaExhausted {
                message: "You exceeded your current quota".to_string(),
            }),
            Self::ProviderError(message) => Err(MindcheckError::provider(message)),
        }
    }
}

/// A mock provider that returns scripted outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
#[derive(Clone)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with successful text responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_outcomes(responses.into_iter().map(MockOutcome::Text).collect())
    }

    /// Create a mock provider pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add an outcome to the end of the queue.
    pub async fn push_outcome(&self, outcome: MockOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Number of `complete` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Text("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn shutdown(&self) -> Result<(), MindcheckError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MindcheckError> {
        self.requests.lock().await.push(request);
        self.next_outcome().await.into_result("mock-model")
    }
}
