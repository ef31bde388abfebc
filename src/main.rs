mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::generate;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::openai::OpenAiClient;
use crate::infra::terminal::{MessageTarget, TerminalPresenter};

#[derive(Parser)]
#[command(
    name = "bcm",
    author,
    version,
    about = "Generate commit messages from staged changes"
)]
struct Cli {
    /// Log pipeline details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the staged diff and copy the commit message to the clipboard.
    Generate(GenerateArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Print the message to stdout instead of copying it.
    #[arg(short, long)]
    print: bool,

    /// Override the configured model.
    #[arg(short, long)]
    model: Option<String>,

    /// Repository to read staged changes from (defaults to the current directory).
    #[arg(short, long)]
    workspace: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Returns whether the invocation succeeded.
async fn run(cli: Cli) -> AppResult<bool> {
    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(true)
        }
        Commands::Generate(args) => run_generate(args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> AppResult<bool> {
    let workspace = match args.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let mut config = AppConfig::load(&workspace)?;
    if let Some(model) = args.model {
        config.generation.model = model;
    }

    if config.openai_api_key.is_none() {
        warn!("OpenAI API key not configured; set OPENAI_API_KEY or run `bcm config init`");
    }

    let language_model = Arc::new(OpenAiClient::new(
        config.base_url.clone(),
        config.openai_api_key.clone(),
        config.request_timeout,
    )?);
    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let target = if args.print {
        MessageTarget::Stdout
    } else {
        MessageTarget::Clipboard
    };
    let presentation = Arc::new(TerminalPresenter::new(target));

    let context = AppContext::new(config.generation, git, language_model, presentation);

    let status = generate::run(context).await;
    Ok(!status.is_failure())
}
