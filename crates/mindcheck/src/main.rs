// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mindcheck - mental well-being screening and support chat.
//!
//! This is the binary entry point for the Mindcheck service.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mindcheck_config::{ConfigError, MindcheckConfig};

/// Mindcheck - mental well-being screening and support chat.
#[derive(Parser, Debug)]
#[command(name = "mindcheck", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Validate the configuration and print the effective settings.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<MindcheckConfig, Vec<ConfigError>> {
    match path {
        Some(path) => mindcheck_config::load_and_validate_path(path),
        None => mindcheck_config::load_and_validate(),
    }
}

/// Renders the effective configuration as TOML with the API key redacted.
fn render_effective_config(config: &MindcheckConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.openai.api_key.is_some() {
        shown.openai.api_key = Some("[redacted]".to_string());
    }
    toml::to_string_pretty(&shown)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            mindcheck_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("mindcheck serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::CheckConfig) => match render_effective_config(&config) {
            Ok(rendered) => {
                println!("mindcheck: configuration is valid\n");
                print!("{rendered}");
            }
            Err(e) => {
                eprintln!("mindcheck check-config: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("mindcheck: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_serve_with_config() {
        let cli = Cli::try_parse_from(["mindcheck", "serve", "--config", "/tmp/m.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/m.toml")));
    }

    #[test]
    fn cli_parses_check_config() {
        let cli = Cli::try_parse_from(["mindcheck", "check-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["mindcheck", "shell"]).is_err());
    }

    #[test]
    fn effective_config_redacts_api_key() {
        let config = mindcheck_config::load_and_validate_str(
            "[openai]\napi_key = \"sk-very-secret\"\n",
        )
        .unwrap();
        let rendered = render_effective_config(&config).unwrap();
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("port = 3000"));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let errors = load_config(Some(&PathBuf::from("/nonexistent/mindcheck.toml"))).unwrap_err();
        assert!(!errors.is_empty());
    }
}
