//! `translate doctor`: report config, environment and server health

use std::io::Write;
use std::time::Duration;

use crate::core::client::{ClientOptions, DeepLxClient};
use crate::core::config::{CliConfig, Settings, DEFAULT_URL, TOKEN_ENVS, URL_ENV};

/// Handle `doctor`. Problems are reported, not returned as errors.
pub async fn handle_doctor(
    url: Option<String>,
    token: Option<String>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    println!("🔍 DeepLX CLI Diagnostic");
    println!("=======================");
    println!();

    let config = CliConfig::load();
    println!("Configuration:");
    for line in describe_config(&config) {
        println!("  {}", line);
    }

    println!("\nEnvironment:");
    for line in describe_environment(|name| std::env::var(name).ok()) {
        println!("  {}", line);
    }

    let settings = Settings::from_env(url.as_deref(), token.as_deref(), &config);
    println!("\nTesting connection to {}:", settings.url);

    let client = match DeepLxClient::new(
        ClientOptions::from_settings(&settings)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_connection_check(false),
    ) {
        Ok(client) => client,
        Err(e) => {
            println!("  ✗ {}", e);
            return Ok(());
        }
    };

    print!("  Checking connectivity... ");
    std::io::stdout().flush()?;
    if let Err(e) = client.check_connection().await {
        println!("✗ Failed");
        println!("  Error: {}", e);
        return Ok(());
    }
    println!("✓ OK");

    print!("  Testing translation... ");
    std::io::stdout().flush()?;
    match client.translate("Hello", "AUTO", "EN").await {
        Ok(result) => {
            println!("✓ OK (got: {})", result.data);
            println!("  Method: {}", result.method);
            println!("  Source: {}", result.source_lang);
        }
        Err(e) => {
            println!("✗ Failed");
            println!("  Error: {}", e);

            if e.is_auth_error() {
                println!("\n💡 Tip: This server requires authentication.");
                println!("   Set a token with: translate config set --token <your-token>");
            }
        }
    }

    Ok(())
}

/// Lines describing the persisted configuration
pub fn describe_config(config: &CliConfig) -> Vec<String> {
    let mut lines = Vec::new();

    match config.url() {
        Some(url) => lines.push(format!("✓ Default URL: {}", url)),
        None => lines.push(format!("✗ Default URL: not set (using {})", DEFAULT_URL)),
    }

    if config.token().is_some() {
        lines.push("✓ Default Token: configured".to_string());
    } else {
        lines.push("ℹ Default Token: not set".to_string());
    }

    if let Some(path) = CliConfig::default_path() {
        lines.push(format!("ℹ Config file: {}", path.display()));
    }

    lines
}

/// Lines describing the relevant environment variables; token values are hidden
pub fn describe_environment<F>(env: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut lines = Vec::new();

    let token_var = TOKEN_ENVS
        .iter()
        .find(|&&name| env(name).is_some_and(|v| !v.trim().is_empty()));
    match token_var {
        Some(name) => lines.push(format!("✓ {}: set", name)),
        None => lines.push("ℹ No token in environment".to_string()),
    }

    if let Some(url) = env(URL_ENV).filter(|v| !v.trim().is_empty()) {
        lines.push(format!("✓ {}: {}", URL_ENV, url));
    }

    lines
}
