pub mod personas;
pub mod plan;
pub mod reflect;
pub mod schema;

use crate::config::Config;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "persona-reflect")]
#[command(
    author,
    version,
    about = "Ask four coaching personas about a dilemma and turn their answers into an action plan"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get every persona's perspective plus suggested actions
    Reflect(ReflectArgs),

    /// Build a full action plan from saved persona responses
    Plan(PlanArgs),

    /// List the configured personas
    Personas,

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct ReflectArgs {
    /// The dilemma to reflect on
    #[arg(required = true)]
    pub dilemma: Vec<String>,

    /// Extra context as key=value (repeatable)
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub context: Vec<(String, Value)>,

    /// Identifier of the user submitting the dilemma
    #[arg(long, default_value = "default_user")]
    pub user_id: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Clone)]
pub struct PlanArgs {
    /// JSON file holding a plan request or a saved reflection
    #[arg(short, long)]
    pub input: PathBuf,

    /// User preference as key=value (repeatable, overrides the input file)
    #[arg(long = "pref", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub preferences: Vec<(String, Value)>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Args, Clone)]
pub struct CommonArgs {
    /// Path to config file (defaults apply when missing)
    #[arg(short, long, default_value = "persona-reflect.yaml")]
    pub config: PathBuf,

    /// Use the built-in offline responder instead of a provider CLI
    #[arg(long)]
    pub offline: bool,

    /// Override per-persona timeout in seconds
    #[arg(long)]
    pub timeout_sec: Option<u64>,

    /// Write JSON and Markdown reports into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print the response as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Load config, apply CLI overrides, validate
pub fn load_config(args: &CommonArgs) -> anyhow::Result<Config> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load_or_default(&args.config)?;

    if args.offline {
        config.force_offline();
    }
    if let Some(timeout_sec) = args.timeout_sec {
        config.timeout_sec = timeout_sec;
    }

    config.validate()?;
    Ok(config)
}

/// Parse `key=value`; the value is JSON when it parses as JSON, else a string
pub fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    let value = serde_json::from_str::<Value>(raw.trim())
        .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
    Ok((key.to_string(), value))
}

pub fn pairs_to_map(pairs: &[(String, Value)]) -> Map<String, Value> {
    pairs.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value_string() {
        assert_eq!(
            parse_key_value("mood=anxious and tired").unwrap(),
            ("mood".to_string(), Value::String("anxious and tired".to_string()))
        );
    }

    #[test]
    fn test_parse_key_value_json() {
        assert_eq!(
            parse_key_value("deadline_days=7").unwrap().1,
            Value::from(7)
        );
        assert_eq!(parse_key_value("urgent=true").unwrap().1, Value::Bool(true));
    }

    #[test]
    fn test_parse_key_value_errors() {
        assert!(parse_key_value("no-equals").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_pairs_keep_order_and_last_wins() {
        let map = pairs_to_map(&[
            ("b".to_string(), Value::from(1)),
            ("a".to_string(), Value::from(2)),
            ("b".to_string(), Value::from(3)),
        ]);
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(map["b"], Value::from(3));
    }

    #[test]
    fn test_cli_parses_reflect() {
        let cli = Cli::try_parse_from([
            "persona-reflect",
            "reflect",
            "I",
            "procrastinate",
            "--context",
            "mood=anxious",
            "--offline",
        ])
        .unwrap();
        match cli.command {
            Commands::Reflect(args) => {
                assert_eq!(args.dilemma.join(" "), "I procrastinate");
                assert_eq!(args.context.len(), 1);
                assert!(args.common.offline);
            }
            _ => panic!("expected reflect"),
        }
    }
}
