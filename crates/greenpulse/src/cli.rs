//! Clap derive structures for the `greenpulse` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// greenpulse -- room occupancy and energy-waste monitoring backend
#[derive(Debug, Parser)]
#[command(
    name = "greenpulse",
    version,
    about = "Room occupancy monitoring backend with energy-waste alerts",
    long_about = "Serves room state over HTTP, classifies webcam frames through an\n\
        image-classification provider, and raises an alert whenever an empty\n\
        room still has its lights or AC on.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "GREENPULSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, env = "GREENPULSE_LOG_JSON", global = true)]
    pub log_json: bool,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port and PORT)
    #[arg(long, short = 'P')]
    pub port: Option<u16>,

    /// Skip warming the reference image cache at startup
    #[arg(long)]
    pub no_preload: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
