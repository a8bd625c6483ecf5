// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mindcheck service.

use thiserror::Error;

use crate::types::FailureClass;

/// The primary error type shared by the provider, triage, and gateway crates.
#[derive(Debug, Error)]
pub enum MindcheckError {
    /// Configuration errors (missing credential header values, bad client settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller payload was malformed or empty. Always rejected before any remote call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The remote provider reported that the account's usage quota is exhausted.
    #[error("provider quota exhausted: {message}")]
    QuotaExhausted { message: String },

    /// The remote provider answered, but not with the mandated JSON shape.
    ///
    /// `raw` holds the completion text for diagnostic logging only; it is
    /// deliberately left out of the `Display` output.
    #[error("provider returned malformed output: {message}")]
    MalformedOutput { message: String, raw: String },

    /// Any other remote provider failure (transport, HTTP status, decoding).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MindcheckError {
    /// Shorthand for a [`MindcheckError::Provider`] without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when a provider-reported message describes an exhausted
    /// usage quota (e.g. "You exceeded your current quota").
    pub fn is_quota_message(message: &str) -> bool {
        message.to_ascii_lowercase().contains("quota")
    }

    /// Classifies this error for dispatcher branching and HTTP surfacing.
    ///
    /// Configuration and internal errors have no class of their own; they
    /// surface as server-side failures like any other upstream error.
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Self::InvalidInput(_) => FailureClass::InvalidInput,
            Self::QuotaExhausted { .. } => FailureClass::UpstreamQuotaExhausted,
            Self::MalformedOutput { .. } => FailureClass::UpstreamMalformedOutput,
            Self::Provider { .. } | Self::Config(_) | Self::Internal(_) => {
                FailureClass::UpstreamOther
            }
        }
    }
}
