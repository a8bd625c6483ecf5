// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for the remote completion capability.

use async_trait::async_trait;

use crate::error::MindcheckError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a remote chat-completion service.
///
/// Implementations are stateless once constructed and shared across
/// requests behind an `Arc`. A failure caused by an exhausted usage quota
/// should be reported as [`MindcheckError::QuotaExhausted`].
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Submits an ordered sequence of role-tagged messages and returns the
    /// top completion.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MindcheckError>;
}
