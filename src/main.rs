//! Main entry point for the DeepLX translate CLI

#![forbid(unsafe_code)]

use clap::{CommandFactory, Parser};
use dotenvy::dotenv;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deeplx_cli::cli::commands::{self, Commands, ConfigCommands, TranslateOptions};
use deeplx_cli::cli::{doctor, setup};
use deeplx_cli::core::client::DEFAULT_TIMEOUT_SECS;
use deeplx_cli::{CliConfig, TranslationError};

/// Log target of the library crate
const LOG_TARGET: &str = "deeplx_cli";

/// A simple CLI for translating text using DeepLX
#[derive(Parser, Debug)]
#[command(
    name = "translate",
    version,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Args {
    /// Text to translate; multiple words are joined with spaces
    text: Vec<String>,

    /// Source language code (e.g., en, fr, es, auto for automatic detection)
    #[arg(short, long, default_value = "auto")]
    source: String,

    /// Target language code (e.g., en, fr, es)
    #[arg(short, long, default_value = "en")]
    target: String,

    /// DeepLX server URL [env: DEEPLX_URL]
    #[arg(short, long)]
    url: Option<String>,

    /// Authentication token for DeepLX server [env: TOKEN, DEEPLX_TOKEN]
    #[arg(short = 'k', long)]
    token: Option<String>,

    /// Show alternative translations
    #[arg(short, long)]
    alternatives: bool,

    /// Request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Skip the reachability check before translating
    #[arg(long)]
    no_check: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();
    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new(format!("{}=debug", LOG_TARGET))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=warn", LOG_TARGET).into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Commands::Config {
            action: ConfigCommands::Set { url, token },
        }) => commands::handle_config_set(url, token),
        Some(Commands::Config {
            action: ConfigCommands::Show,
        }) => commands::handle_config_show(),
        Some(Commands::Setup) => setup::handle_setup().await,
        Some(Commands::Doctor {
            url,
            token,
            timeout,
        }) => doctor::handle_doctor(url, token, timeout).await,
        None if args.text.is_empty() => {
            if CliConfig::load().is_empty() {
                commands::print_welcome();
            } else {
                Args::command().print_help()?;
            }
            Ok(())
        }
        None => {
            commands::handle_translate(TranslateOptions {
                text: args.text.join(" "),
                source_lang: args.source,
                target_lang: args.target,
                url: args.url,
                token: args.token,
                show_alternatives: args.alternatives,
                timeout_secs: args.timeout,
                check_connection: !args.no_check,
            })
            .await
        }
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<TranslationError>() {
        Some(e) if e.is_connection_error() => {
            eprintln!("Error: {}", e);
            eprintln!("\n💡 First time? Run: translate setup");
        }
        _ => eprintln!("Error: {:#}", err),
    }
}
