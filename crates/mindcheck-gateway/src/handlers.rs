// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /api/assess, POST /api/chat, GET /health.

use std::future::Future;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mindcheck_core::types::{AnsweredItem, ChatMessage, ChatReply, FailureClass, RiskAssessment};
use mindcheck_core::MindcheckError;
use mindcheck_triage::Dispatched;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::server::AppState;

/// Request body for POST /api/assess.
#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    /// Questionnaire answers in question order.
    pub answers: Vec<AnsweredItem>,
}

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Whether a remote provider is configured.
    pub remote_enabled: bool,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A [`MindcheckError`] rendered as an HTTP error response.
#[derive(Debug)]
pub struct ApiError(pub MindcheckError);

impl From<MindcheckError> for ApiError {
    fn from(err: MindcheckError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(MindcheckError::InvalidInput(rejection.body_text()))
    }
}

/// Maps a failure class onto the status surfaced to callers.
///
/// Quota exhaustion is absorbed by the dispatcher and only reaches this
/// point if a caller bypasses it, so it is treated like any upstream failure.
pub fn status_for(err: &MindcheckError) -> StatusCode {
    match err {
        MindcheckError::Internal(_) | MindcheckError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => match err.failure_class() {
            FailureClass::InvalidInput => StatusCode::BAD_REQUEST,
            FailureClass::UpstreamQuotaExhausted
            | FailureClass::UpstreamMalformedOutput
            | FailureClass::UpstreamOther => StatusCode::BAD_GATEWAY,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = match &self.0 {
            MindcheckError::Internal(_) | MindcheckError::Config(_) => {
                error!(error = %self.0, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Body-limit rejections keep their own status; every other body problem is
/// invalid input.
fn reject(rejection: JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
            .into_response();
    }
    ApiError::from(rejection).into_response()
}

/// Runs a dispatcher call under the configured request timeout.
async fn dispatch<T, F>(state: &AppState, operation: &'static str, call: F) -> Response
where
    T: Serialize,
    F: Future<Output = Result<Dispatched<T>, MindcheckError>>,
{
    match tokio::time::timeout(state.request_timeout, call).await {
        Ok(Ok(dispatched)) => {
            info!(operation, path = %dispatched.path, "request served");
            (StatusCode::OK, Json(dispatched.value)).into_response()
        }
        Ok(Err(err)) => ApiError(err).into_response(),
        Err(_) => {
            warn!(operation, timeout = ?state.request_timeout, "request timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorResponse {
                    error: format!(
                        "response timeout ({}s)",
                        state.request_timeout.as_secs()
                    ),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/assess
///
/// Scores a questionnaire and returns a [`RiskAssessment`].
pub async fn post_assess(
    State(state): State<AppState>,
    body: Result<Json<AssessRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return reject(rejection),
    };

    dispatch::<RiskAssessment, _>(&state, "assess", state.dispatcher.assess(&body.answers)).await
}

/// POST /api/chat
///
/// Returns a [`ChatReply`] for the conversation.
pub async fn post_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return reject(rejection),
    };

    dispatch::<ChatReply, _>(&state, "chat", state.dispatcher.chat(&body.messages)).await
}

/// GET /health
///
/// Returns health status of the gateway.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        remote_enabled: state.dispatcher.remote_enabled(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
