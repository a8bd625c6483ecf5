// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped data model shared by the deterministic and remote paths.
//!
//! Nothing here outlives a single request; none of these types are persisted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single questionnaire answer.
///
/// `id` is the explicit 1-based question number. When absent, the item's
/// 1-based position in the submitted sequence identifies the question.
/// Scores are taken at face value; values outside `0..=3` are not clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub score: i64,
}

impl AnsweredItem {
    /// An answer identified only by its position in the sequence.
    pub fn scored(score: i64) -> Self {
        Self { id: None, score }
    }
}

/// Coarse risk category for one questionnaire subscale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Sum at or above which a subscale is rated high.
    pub const HIGH_THRESHOLD: i64 = 14;
    /// Sum at or above which a subscale is rated moderate.
    pub const MODERATE_THRESHOLD: i64 = 7;

    /// Maps a subscale sum to its risk level. Total over all integers.
    pub fn from_sum(sum: i64) -> Self {
        if sum >= Self::HIGH_THRESHOLD {
            Self::High
        } else if sum >= Self::MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Per-subscale risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub stress: RiskLevel,
    pub anxiety: RiskLevel,
    pub depression: RiskLevel,
}

/// The assessment returned to callers, identical in shape for both paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub summary: String,
    pub risks: RiskProfile,
    pub recommendations: String,
}

/// Author of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A supportive reply to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Failure taxonomy driving dispatcher branching and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FailureClass {
    InvalidInput,
    UpstreamQuotaExhausted,
    UpstreamMalformedOutput,
    UpstreamOther,
}

/// Which path produced a dispatcher result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResponsePath {
    /// No credential configured; computed locally.
    Deterministic,
    /// Remote provider answered successfully.
    Remote,
    /// Remote provider reported quota exhaustion; computed locally.
    QuotaFallback,
}

/// Output format requested from the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free-form text.
    #[default]
    Text,
    /// The provider's JSON-object structured-output mode, where available.
    JsonObject,
}

/// A request to the opaque completion capability.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Ordered, role-tagged messages.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Requested output format.
    pub response_format: ResponseFormat,
}

/// A completion returned by the provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Provider-assigned response identifier.
    pub id: String,
    /// Text of the top completion; empty when the provider returned none.
    pub content: String,
    /// Model that produced the completion.
    pub model: String,
}
