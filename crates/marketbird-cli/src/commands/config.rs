//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use marketbird_core::models::config::MarketbirdConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration (API token redacted)
    Show,

    /// Initialize a new configuration file, seeded from the environment
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Path => show_path(),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marketbird")
        .join("config.json")
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        MarketbirdConfig::from_file(&config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        MarketbirdConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&redacted(&config)?)?);

    if let Err(e) = config.validate() {
        println!();
        println!("{} {}", style("⚠").yellow(), e);
    }

    Ok(())
}

/// Render the configuration with the API token masked. The token is a
/// credential and must never reach a terminal or a pasted bug report.
fn redacted(config: &MarketbirdConfig) -> anyhow::Result<serde_json::Value> {
    let mut json = serde_json::to_value(config)?;
    if let Some(token) = json.pointer_mut("/api/api_token") {
        *token = serde_json::Value::String(mask_token(&config.api.api_token));
    }
    Ok(json)
}

/// Keep the last four characters so tokens stay distinguishable.
fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }
    let tail: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Seed from MONEYBIRD_* / invoice id environment variables so an already
    // configured shell produces a ready-to-use file.
    let config = MarketbirdConfig::from_env();
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    if let Err(e) = config.validate() {
        println!(
            "{} {}; edit the file before running 'marketbird process'.",
            style("⚠").yellow(),
            e
        );
    }

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'marketbird config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_keeps_only_tail() {
        assert_eq!(mask_token("live_abcdef123456"), "****3456");
        assert_eq!(mask_token("abcd"), "****");
        assert_eq!(mask_token("ab"), "****");
        assert_eq!(mask_token(""), "");
    }

    #[test]
    fn test_redacted_never_contains_token() {
        let mut config = MarketbirdConfig::default();
        config.api.api_token = "super-secret-token-9876".to_string();

        let json = redacted(&config).unwrap();
        let rendered = serde_json::to_string(&json).unwrap();
        assert!(!rendered.contains("super-secret-token-9876"));
        assert_eq!(json["api"]["api_token"], "****9876");
    }
}
