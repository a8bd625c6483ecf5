// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Mindcheck integration tests.
//!
//! Provides a mock completion provider for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock completion provider with scripted outcomes

pub mod mock_provider;

pub use mock_provider::{MockOutcome, MockProvider};
