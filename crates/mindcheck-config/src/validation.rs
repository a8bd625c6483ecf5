// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, temperature ranges, and URL schemes.

use crate::diagnostic::ConfigError;
use crate::model::MindcheckConfig;

/// Largest sampling temperature accepted by OpenAI-compatible APIs.
const MAX_TEMPERATURE: f32 = 2.0;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MindcheckConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must be non-zero".to_string());
    }

    if config.server.request_timeout_secs == 0 {
        fail("server.request_timeout_secs must be greater than 0".to_string());
    }

    if let Some(dir) = &config.server.static_dir {
        if !std::path::Path::new(dir).is_dir() {
            fail(format!("server.static_dir `{dir}` is not an existing directory"));
        }
    }

    let base_url = config.openai.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "openai.base_url must start with http:// or https://, got `{base_url}`"
        ));
    }

    if config.openai.model.trim().is_empty() {
        fail("openai.model must not be empty".to_string());
    }

    for (key, value) in [
        ("assessment_temperature", config.openai.assessment_temperature),
        ("chat_temperature", config.openai.chat_temperature),
    ] {
        if !(0.0..=MAX_TEMPERATURE).contains(&value) {
            fail(format!(
                "openai.{key} must be between 0.0 and {MAX_TEMPERATURE}, got {value}"
            ));
        }
    }

    if config.openai.timeout_secs == 0 {
        fail("openai.timeout_secs must be greater than 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
