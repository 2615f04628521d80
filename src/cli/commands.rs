//! CLI command definitions and handlers

use anyhow::Context;
use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::core::client::{normalize_base_url, ClientOptions, DeepLxClient};
use crate::core::config::{CliConfig, Settings, DEFAULT_URL};
use crate::core::models::TranslationResponse;

/// Subcommands of `translate`
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure default settings
    Config {
        /// Config action to run
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Interactive setup for DeepLX CLI
    Setup,

    /// Diagnose configuration and connection issues
    Doctor {
        /// DeepLX server URL to test (defaults to the configured one)
        #[arg(short, long)]
        url: Option<String>,

        /// Authentication token to test with
        #[arg(short = 'k', long)]
        token: Option<String>,

        /// Timeout for each check, in seconds
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
}

/// Actions of `translate config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Set default DeepLX server URL
        #[arg(long)]
        url: Option<String>,

        /// Set default authentication token
        #[arg(long)]
        token: Option<String>,
    },

    /// Show current configuration
    Show,
}

/// Everything the root command needs to run one translation
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Words joined with spaces
    pub text: String,
    /// `--source`
    pub source_lang: String,
    /// `--target`
    pub target_lang: String,
    /// `--url`
    pub url: Option<String>,
    /// `--token`
    pub token: Option<String>,
    /// `--alternatives`
    pub show_alternatives: bool,
    /// `--timeout`
    pub timeout_secs: u64,
    /// False with `--no-check`
    pub check_connection: bool,
}

/// Handle the root command: translate text and print the result
pub async fn handle_translate(options: TranslateOptions) -> anyhow::Result<()> {
    let config = CliConfig::load();
    let settings = Settings::from_env(options.url.as_deref(), options.token.as_deref(), &config);

    debug!(
        "URL={}, Source={}, Target={}, HasToken={}",
        settings.url,
        options.source_lang.to_uppercase(),
        options.target_lang.to_uppercase(),
        settings.token.is_some()
    );

    let client = DeepLxClient::new(
        ClientOptions::from_settings(&settings)
            .with_timeout(Duration::from_secs(options.timeout_secs))
            .with_connection_check(options.check_connection),
    )?;

    let result = client
        .translate(&options.text, &options.source_lang, &options.target_lang)
        .await
        .context("Translation error")?;

    print!("{}", render_translation(&result, options.show_alternatives));
    Ok(())
}

/// Format a translation for stdout
pub fn render_translation(result: &TranslationResponse, show_alternatives: bool) -> String {
    let mut out = format!("{}\n", result.data);

    if show_alternatives && !result.alternatives.is_empty() {
        out.push_str("\nAlternatives:\n");
        for (i, alt) in result.alternatives.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, alt));
        }
    }

    out
}

/// Handle `config set`
pub fn handle_config_set(url: Option<String>, token: Option<String>) -> anyhow::Result<()> {
    // Blank values would erase the stored field on save
    let url = url.filter(|v| !v.trim().is_empty());
    let token = token.filter(|v| !v.trim().is_empty());

    if url.is_none() && token.is_none() {
        anyhow::bail!("nothing to set: pass a non-empty --url and/or --token");
    }

    let mut config = CliConfig::load();

    if let Some(url) = url {
        let url = normalize_base_url(&url)?;
        println!("Set default URL to: {}", url);
        config.default_url = Some(url);
    }

    if let Some(token) = token {
        config.default_token = Some(token.trim().to_string());
        println!("Set default token");
    }

    let path = config.save().context("Failed to save configuration")?;
    debug!("Configuration written to {}", path.display());
    Ok(())
}

/// Handle `config show`
pub fn handle_config_show() -> anyhow::Result<()> {
    let config = CliConfig::load();
    print!("{}", render_config(&config, CliConfig::default_path().as_deref()));
    Ok(())
}

/// Format the persisted configuration; the token itself is never shown
pub fn render_config(config: &CliConfig, path: Option<&Path>) -> String {
    let mut out = String::from("Current configuration:\n");

    if let Some(path) = path {
        out.push_str(&format!("  Config file: {}\n", path.display()));
    }

    match config.url() {
        Some(url) => out.push_str(&format!("  Default URL: {}\n", url)),
        None => out.push_str(&format!("  Default URL: not set (using {})\n", DEFAULT_URL)),
    }

    if config.token().is_some() {
        out.push_str("  Default Token: [configured]\n");
    } else {
        out.push_str("  Default Token: [not set]\n");
    }

    out
}

/// Print the first-run greeting
pub fn print_welcome() {
    println!("👋 Welcome to DeepLX CLI!");
    println!("\nIt looks like this is your first time using the tool.");
    println!("Let's get you set up:");
    println!("\n  translate setup");
    println!("\nOr see all available commands:");
    println!("\n  translate --help");
}

/// Spinner shown while waiting on the network
pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(data: &str, alternatives: &[&str]) -> TranslationResponse {
        TranslationResponse {
            code: 200,
            data: data.to_string(),
            alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_translation_plain() {
        let out = render_translation(&response("Hola", &["Buenas"]), false);
        assert_eq!(out, "Hola\n");
    }

    #[test]
    fn test_render_translation_with_alternatives() {
        let out = render_translation(&response("Hola", &["Buenas", "Qué tal"]), true);
        assert_eq!(out, "Hola\n\nAlternatives:\n1. Buenas\n2. Qué tal\n");
    }

    #[test]
    fn test_render_translation_without_any_alternatives() {
        let out = render_translation(&response("Hola", &[]), true);
        assert_eq!(out, "Hola\n");
    }

    #[test]
    fn test_render_config_masks_token() {
        let config = CliConfig {
            default_url: Some("https://deeplx.example.com".to_string()),
            default_token: Some("super-secret".to_string()),
        };
        let out = render_config(&config, Some(Path::new("/tmp/translate/config.json")));

        assert!(out.contains("Config file: /tmp/translate/config.json"));
        assert!(out.contains("Default URL: https://deeplx.example.com"));
        assert!(out.contains("Default Token: [configured]"));
        assert!(!out.contains("super-secret"));
    }

    #[test]
    fn test_render_config_empty() {
        let out = render_config(&CliConfig::default(), None);
        assert!(out.contains("Default URL: not set (using http://localhost:1188)"));
        assert!(out.contains("Default Token: [not set]"));
    }
}
