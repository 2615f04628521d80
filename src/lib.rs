//! DeepLX CLI - command-line client for DeepLX translation servers
//!
//! This library provides the HTTP client, configuration persistence and
//! command handlers used by the `translate` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use self::core::{
    client::{ClientOptions, DeepLxClient},
    config::{CliConfig, Settings},
    errors::{Result, TranslationError},
    models::{TranslationRequest, TranslationResponse},
};

/// Application name, as typed on the command line
pub const APP_NAME: &str = "translate";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
