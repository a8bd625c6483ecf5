// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mindcheck service.
//!
//! This crate provides the request-scoped data model, the shared error
//! type, and the provider trait that the remote completion capability
//! implements. Both the deterministic and the remote path speak these types.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MindcheckError;
pub use traits::{PluginAdapter, ProviderAdapter};
pub use types::{
    AnsweredItem, ChatMessage, ChatReply, ChatRole, CompletionRequest, CompletionResponse,
    FailureClass, ResponseFormat, ResponsePath, RiskAssessment, RiskLevel,
    RiskProfile,
};
