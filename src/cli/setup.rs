//! `translate setup`: interactive first-run wizard

use anyhow::Context;
use dialoguer::{Confirm, Input, Password, Select};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::commands::spinner;
use crate::core::client::{normalize_base_url, ClientOptions, DeepLxClient};
use crate::core::config::{CliConfig, DEFAULT_URL};
use crate::core::errors::TranslationError;
use crate::core::models::TranslationResponse;

const LOCAL_TIMEOUT: Duration = Duration::from_secs(5);
const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Docker command that starts a local DeepLX server
pub const DOCKER_COMMAND: &str = "docker run -d -p 1188:1188 ghcr.io/owo-network/deeplx:latest";

/// Outcome of checking a server with a sample translation
#[derive(Debug)]
pub enum ServerCheck {
    /// Reachable and translating
    Ready(TranslationResponse),
    /// Reachable but rejects the (missing) token
    NeedsToken,
    /// Reachable but the sample translation failed
    Failed(TranslationError),
    /// Nothing answered at the URL
    NotFound(TranslationError),
}

/// Check that `url` answers, then run a sample translation against it
pub async fn check_server(
    url: &str,
    token: Option<String>,
    timeout: Duration,
    text: &str,
) -> ServerCheck {
    let client = match DeepLxClient::new(client_options(url, token, timeout)) {
        Ok(client) => client,
        Err(e) => return ServerCheck::NotFound(e),
    };

    if let Err(e) = client.check_connection().await {
        return ServerCheck::NotFound(e);
    }

    match client.translate(text, "AUTO", "EN").await {
        Ok(result) => ServerCheck::Ready(result),
        Err(e) if e.is_auth_error() => ServerCheck::NeedsToken,
        Err(e) => ServerCheck::Failed(e),
    }
}

/// Where the wizard looks for a local server and where it saves the result
#[derive(Debug, Clone)]
pub struct Setup {
    local_url: String,
    config_path: PathBuf,
}

impl Setup {
    /// Wizard for an explicit local URL and config file
    pub fn new(local_url: impl Into<String>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            local_url: local_url.into(),
            config_path: config_path.into(),
        }
    }

    /// Wizard for `localhost:1188` and the user's config file
    pub fn for_current_user() -> anyhow::Result<Self> {
        let path = CliConfig::default_path()
            .context("cannot determine the user config directory")?;
        Ok(Self::new(DEFAULT_URL, path))
    }

    /// Config file this wizard writes
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Look for the local server and save it if it works.
    /// Returns true once a configuration was saved.
    pub async fn try_local_server(&self) -> anyhow::Result<bool> {
        let pb = spinner("Checking for local DeepLX server...");
        let check = check_server(&self.local_url, None, LOCAL_TIMEOUT, "test").await;
        pb.finish_and_clear();

        match check {
            ServerCheck::NotFound(_) => {
                println!("Checking for local DeepLX server... ✗ Not found");
                Ok(false)
            }
            ServerCheck::Ready(_) => {
                println!("Checking for local DeepLX server... ✓ Found!");
                self.save(&self.local_url, None)?;
                Ok(true)
            }
            ServerCheck::Failed(e) => {
                println!("Checking for local DeepLX server... ✓ Found!");
                println!("⚠️  Test translation failed: {}", e);
                Ok(false)
            }
            ServerCheck::NeedsToken => {
                println!("Checking for local DeepLX server... ✓ Found!");
                println!("\n⚠️  Server requires authentication");
                let token = Password::new()
                    .with_prompt("Enter your token (or press Enter to skip)")
                    .allow_empty_password(true)
                    .interact()?;
                self.verify_token(token.trim()).await
            }
        }
    }

    /// Retry the local server with `token` and save it if accepted
    pub async fn verify_token(&self, token: &str) -> anyhow::Result<bool> {
        if token.is_empty() {
            return Ok(false);
        }

        match check_server(&self.local_url, Some(token.to_string()), LOCAL_TIMEOUT, "test").await {
            ServerCheck::Ready(_) => {
                self.save(&self.local_url, Some(token.to_string()))?;
                Ok(true)
            }
            ServerCheck::NeedsToken => {
                println!("⚠️  Token verification failed: {}", TranslationError::Unauthorized);
                Ok(false)
            }
            ServerCheck::Failed(e) | ServerCheck::NotFound(e) => {
                println!("⚠️  Token verification failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Ask for a remote server, verify it and save it
    async fn setup_remote_server(&self) -> anyhow::Result<()> {
        let raw_url: String = Input::new()
            .with_prompt("Enter the DeepLX server URL")
            .allow_empty(true)
            .interact_text()?;
        if raw_url.trim().is_empty() {
            return Ok(());
        }

        let url = match normalize_base_url(&raw_url) {
            Ok(url) => url,
            Err(e) => {
                println!("✗ {}", e);
                return Ok(());
            }
        };

        let pb = spinner("Testing connection...");
        let reachable = DeepLxClient::new(client_options(&url, None, REMOTE_TIMEOUT))?
            .check_connection()
            .await;
        pb.finish_and_clear();

        if let Err(e) = reachable {
            println!("Testing connection... ✗ Failed");
            println!("Error: {}", e);
            return Ok(());
        }
        println!("Testing connection... ✓ Connected");

        let needs_auth = Confirm::new()
            .with_prompt("Does this server require authentication?")
            .default(false)
            .interact()?;

        let token = if needs_auth {
            let token = Password::new().with_prompt("Enter your token").interact()?;
            Some(token.trim().to_string()).filter(|t| !t.is_empty())
        } else {
            None
        };

        let pb = spinner("Testing translation...");
        let check = check_server(&url, token.clone(), REMOTE_TIMEOUT, "Hello").await;
        pb.finish_and_clear();

        match check {
            ServerCheck::Ready(result) => {
                println!("Testing translation... ✓ Success! Got: {}", result.data)
            }
            ServerCheck::NeedsToken => {
                println!("Testing translation... ✗ Failed");
                println!("Error: {}", TranslationError::Unauthorized);
                return Ok(());
            }
            ServerCheck::Failed(e) | ServerCheck::NotFound(e) => {
                println!("Testing translation... ✗ Failed");
                println!("Error: {}", e);
                return Ok(());
            }
        }

        self.save(&url, token)
    }

    /// Write the chosen server and token, replacing any previous config
    pub fn save(&self, url: &str, token: Option<String>) -> anyhow::Result<()> {
        let config = CliConfig {
            default_url: Some(url.to_string()),
            default_token: token,
        };
        config
            .save_to(&self.config_path)
            .context("Failed to save configuration")?;

        println!("\n✓ Configuration saved to {}", self.config_path.display());
        println!("\nYou're all set! Try:");
        println!("  translate \"Hello world\"");
        Ok(())
    }
}

/// Handle `setup`
pub async fn handle_setup() -> anyhow::Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "setup needs an interactive terminal; configure non-interactively with:\n  \
             translate config set --url <server-url> [--token <your-token>]"
        );
    }

    let setup = Setup::for_current_user()?;

    println!("🚀 DeepLX CLI Setup");
    println!("==================");
    println!();

    if setup.try_local_server().await? {
        return Ok(());
    }

    println!("\n📦 No usable local DeepLX server found.\n");

    let choices = [
        "Start DeepLX with Docker (recommended)",
        "Use a remote DeepLX server",
        "Exit and set up manually",
    ];
    let choice = Select::new()
        .with_prompt("Would you like to")
        .items(&choices)
        .default(0)
        .interact()?;

    match choice {
        0 => {
            println!("\nTo start DeepLX with Docker, run:");
            println!("\n  {}", DOCKER_COMMAND);
            println!("\nThen run 'translate setup' again.");
        }
        1 => setup.setup_remote_server().await?,
        _ => {
            println!("\nTo set up manually:");
            println!("1. Start a DeepLX server");
            println!("2. Configure with: translate config set --url <server-url>");
            println!("3. If needed, add: --token <your-token>");
        }
    }

    Ok(())
}

fn client_options(url: &str, token: Option<String>, timeout: Duration) -> ClientOptions {
    ClientOptions::new(url, token)
        .with_timeout(timeout)
        .with_connection_check(false)
}

