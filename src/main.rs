//! clawctl - config console for OpenClaw-compatible gateways.
//!
//! Reads and edits the gateway's JSON config document through symbolic paths
//! and reports how the OpenAI credential and default model resolve.

mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) const VERSION: &str = "0.1.0";

#[derive(Parser)]
#[command(name = "clawctl", about = "clawctl - Gateway Config Console", version = VERSION)]
struct Cli {
    /// Path to the gateway config document. Default: ~/.openclaw/openclaw.json.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the OpenAI credential and default model resolve.
    Status {
        /// Print the resolved details as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the value at a config path.
    Get {
        /// Dotted config path (e.g. "agents.defaults.model").
        path: String,
    },
    /// Set the value at a config path.
    Set {
        /// Dotted config path.
        path: String,
        /// New value; parsed as JSON, else stored as a string.
        value: String,
    },
    /// Remove the value at a config path.
    Unset {
        /// Dotted config path.
        path: String,
    },
    /// Store the OpenAI API key.
    SetKey {
        /// The key (e.g. "sk-...").
        key: String,
        /// Write models.providers.openai.apiKey instead of env.OPENAI_API_KEY.
        #[arg(long)]
        provider: bool,
    },
    /// Remove the OpenAI API key from every candidate location.
    ClearKey,
    /// Select the default model, targeting the correct leaf for its shape.
    UseModel {
        /// Model identifier. Default: openai/gpt-5.2.
        model: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Status { json } => cli::run_status(config, *json),
        Commands::Get { path } => cli::run_get(config, path),
        Commands::Set { path, value } => cli::run_set(config, path, value),
        Commands::Unset { path } => cli::run_unset(config, path),
        Commands::SetKey { key, provider } => cli::run_set_key(config, key, *provider),
        Commands::ClearKey => cli::run_clear_key(config),
        Commands::UseModel { model } => cli::run_use_model(config, model.as_deref()),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
