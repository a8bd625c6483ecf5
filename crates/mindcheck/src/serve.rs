// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mindcheck serve` command implementation.
//!
//! Wires configuration, the optional OpenAI provider, the dispatcher and
//! the HTTP gateway together, then serves until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mindcheck_config::{MindcheckConfig, OpenAiConfig};
use mindcheck_core::traits::{PluginAdapter, ProviderAdapter};
use mindcheck_core::MindcheckError;
use mindcheck_gateway::{start_server, AppState, ServerConfig};
use mindcheck_openai::{resolve_api_key, OpenAiProvider};
use mindcheck_triage::{Dispatcher, InferenceSettings};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the HTTP server with the given configuration.
pub async fn run_serve(config: MindcheckConfig) -> Result<(), MindcheckError> {
    init_tracing(&config.server.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting mindcheck");

    let api_key = resolve_api_key(config.openai.api_key.as_deref());
    let provider = build_provider(&config.openai, api_key.as_deref())?;
    if let Some(provider) = &provider {
        info!(
            provider = provider.name(),
            version = %provider.version(),
            "provider ready"
        );
    }

    let dispatcher = Dispatcher::new(provider.clone(), inference_settings(&config.openai));
    let state = AppState::new(
        dispatcher,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        static_dir: config.server.static_dir.as_ref().map(PathBuf::from),
    };

    let cancel = shutdown::install_signal_handler();
    start_server(&server_config, state, async move {
        cancel.cancelled().await;
    })
    .await?;

    if let Some(provider) = provider {
        if let Err(e) = provider.shutdown().await {
            warn!(error = %e, "provider shutdown failed");
        }
    }

    info!("mindcheck serve shutdown complete");
    Ok(())
}

fn inference_settings(openai: &OpenAiConfig) -> InferenceSettings {
    InferenceSettings {
        assessment_temperature: openai.assessment_temperature,
        chat_temperature: openai.chat_temperature,
    }
}

/// Builds the remote provider when a credential exists. `None` puts the
/// service in deterministic-only mode.
fn build_provider(
    openai: &OpenAiConfig,
    api_key: Option<&str>,
) -> Result<Option<Arc<dyn ProviderAdapter>>, MindcheckError> {
    match api_key {
        Some(key) => {
            let provider: Arc<dyn ProviderAdapter> = Arc::new(OpenAiProvider::new(openai, key)?);
            info!(model = %openai.model, "remote inference enabled");
            Ok(Some(provider))
        }
        None => {
            warn!("no OpenAI API key configured, serving deterministic responses only");
            Ok(None)
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mindcheck={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
