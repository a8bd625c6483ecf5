// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mindcheck.toml` > `~/.config/mindcheck/mindcheck.toml` >
//! `/etc/mindcheck/mindcheck.toml` with environment variable overrides via `MINDCHECK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MindcheckConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/mindcheck/mindcheck.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mindcheck.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mindcheck/mindcheck.toml` (system-wide)
/// 3. `~/.config/mindcheck/mindcheck.toml` (user XDG config)
/// 4. `./mindcheck.toml` (local directory)
/// 5. `MINDCHECK_*` environment variables
pub fn load_config() -> Result<MindcheckConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<MindcheckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MindcheckConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MindcheckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MindcheckConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MindcheckConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Path of the per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mindcheck").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `MINDCHECK_OPENAI_API_KEY` must map to `openai.api_key`,
/// not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MINDCHECK_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("openai_", "openai.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MINDCHECK_OPENAI_API_KEY", "sk-env");
            jail.set_env("MINDCHECK_SERVER_PORT", "8088");
            jail.set_env("MINDCHECK_OPENAI_CHAT_TEMPERATURE", "0.9");
            let config = load_config()?;
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
            assert_eq!(config.server.port, 8088);
            assert!((config.openai.chat_temperature - 0.9).abs() < f32::EPSILON);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
                [openai]
                model = "gpt-4o"
                "#,
            )?;
            let config = load_config()?;
            assert_eq!(config.openai.model, "gpt-4o");
            Ok(())
        });
    }

    #[test]
    fn env_beats_file() {
        figment::Jail::expect_with(|jail| {
            let path = jail.directory().join("custom.toml");
            std::fs::write(&path, "[server]\nport = 4000\n")
                .map_err(|e| figment::Error::from(e.to_string()))?;
            jail.set_env("MINDCHECK_SERVER_PORT", "5000");
            let config = load_config_from_path(&path)?;
            assert_eq!(config.server.port, 5000);
            Ok(())
        });
    }
}
