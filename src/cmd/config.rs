use std::fmt::Display;
use std::io::{self, Write};
use std::str::FromStr;

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, StoredConfig, config_file_path};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring bcm.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt("OpenAI API key", &mut cfg.openai_api_key, true)?;
    apply_prompt(
        &format!("Model (default {DEFAULT_MODEL})"),
        &mut cfg.model,
        false,
    )?;
    apply_prompt(
        &format!("API base URL (default {DEFAULT_BASE_URL})"),
        &mut cfg.base_url,
        false,
    )?;
    apply_parsed_prompt("Single-request diff limit (characters)", &mut cfg.chunk_threshold)?;
    apply_parsed_prompt("Max tokens per chunk summary", &mut cfg.summary_max_tokens)?;
    apply_parsed_prompt("Max tokens for the final message", &mut cfg.polish_max_tokens)?;
    apply_parsed_prompt("Concurrent requests", &mut cfg.max_concurrent_requests)?;
    apply_parsed_prompt("Request timeout (seconds)", &mut cfg.request_timeout_secs)?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("OpenAI API key: {}", mask_secret(&cfg.openai_api_key));
    println!("Model: {}", display_value(&cfg.model));
    println!("API base URL: {}", display_value(&cfg.base_url));
    println!(
        "Single-request diff limit: {}",
        display_value(&cfg.chunk_threshold)
    );
    println!(
        "Max tokens per chunk summary: {}",
        display_value(&cfg.summary_max_tokens)
    );
    println!(
        "Max tokens for the final message: {}",
        display_value(&cfg.polish_max_tokens)
    );
    println!(
        "Concurrent requests: {}",
        display_value(&cfg.max_concurrent_requests)
    );
    println!(
        "Request timeout (seconds): {}",
        display_value(&cfg.request_timeout_secs)
    );

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn apply_parsed_prompt<T>(field: &str, target: &mut Option<T>) -> AppResult<()>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let current = target.as_ref().map(ToString::to_string);
    match prompt(field, current.as_deref(), false)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(parse_value(field, &value)?),
    }
    Ok(())
}

fn parse_value<T>(field: &str, value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|err| AppError::Configuration(format!("invalid value for {field}: {err}")))
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::from_input(&input))
}

fn display_value<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
