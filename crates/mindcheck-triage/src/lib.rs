// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dual-path response engine.
//!
//! The deterministic path (`scoring`, `responder`) always succeeds for
//! well-formed input. The remote path (`inference`) calls a completion
//! provider. The [`Dispatcher`] decides which one answers a request.

pub mod dispatcher;
pub mod inference;
pub mod prompt;
pub mod responder;
pub mod scoring;

pub use dispatcher::{Dispatched, Dispatcher};
pub use inference::{InferenceGateway, InferenceSettings};
