// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Mindcheck service.
//!
//! Exposes the assessment and chat operations of the
//! [`Dispatcher`](mindcheck_triage::Dispatcher) as JSON endpoints, plus a
//! health probe and optional static file serving for the front-end.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, AppState, ServerConfig};
