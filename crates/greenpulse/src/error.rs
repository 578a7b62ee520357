//! CLI error types with miette diagnostics.
//!
//! Maps config and core errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use greenpulse_config::ConfigError;
use greenpulse_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("No vision API key configured")]
    #[diagnostic(
        code(greenpulse::no_credentials),
        help(
            "Set the GREENPULSE_VISION_API_KEY environment variable,\n\
             or set vision.api_key / vision.api_key_env in the config file."
        )
    )]
    NoCredentials,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(greenpulse::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(greenpulse::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error("Could not load configuration: {message}")]
    #[diagnostic(
        code(greenpulse::config),
        help("Check the file with: greenpulse config show")
    )]
    Config { message: String },

    // ── Runtime ──────────────────────────────────────────────────────
    #[error("Could not bind {addr}")]
    #[diagnostic(
        code(greenpulse::bind),
        help("Another process may hold the port. Try --port or the PORT variable.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(greenpulse::core))]
    Core(CoreError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCredentials => exit_code::AUTH,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials => Self::NoCredentials,
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other @ (ConfigError::Figment(_) | ConfigError::Serialization(_)) => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => Self::Config { message },
            other => Self::Core(other),
        }
    }
}
