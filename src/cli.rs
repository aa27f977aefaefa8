//! Command-line interface for pplx
//!
//! Provides argument parsing and subcommand handling for the `pplx` binary.

use crate::options::ChatCompletionOptions;
use crate::types::{ChatMessage, ModelType};
use clap::{Args, Parser, Subcommand};

/// Command-line client for the Perplexity chat completions API
#[derive(Parser)]
#[command(name = "pplx")]
#[command(version)]
#[command(about = "Command-line client for the Perplexity chat completions API")]
pub struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "pplx.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a single prompt and print the reply
    Chat(ChatArgs),
    /// List supported models and their context lengths
    Models,
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// The user prompt
    pub prompt: String,

    /// Model name (defaults to mistral-7b-instruct)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Optional system message sent before the prompt
    #[arg(short, long)]
    pub system: Option<String>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long, conflicts_with = "top_p")]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub top_p: Option<f64>,

    #[arg(long, default_value_t = 0)]
    pub top_k: u32,

    /// API key; a bare key is sent as `Bearer <key>`
    #[arg(long, env = "PPLX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ChatArgs {
    pub fn to_options(&self) -> ChatCompletionOptions {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(self.prompt.clone()));

        ChatCompletionOptions {
            model: self.model.clone().unwrap_or_default(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            ..Default::default()
        }
    }
}

/// `Authorization` header value for `key`, adding the `Bearer` scheme if missing
pub fn authorization_value(key: &str) -> String {
    let key = key.trim();
    if key.starts_with("Bearer ") {
        key.to_string()
    } else {
        format!("Bearer {}", key)
    }
}

/// One line per supported model: name and context length
pub fn model_listing() -> String {
    ModelType::ALL
        .iter()
        .map(|m| {
            let marker = if *m == ModelType::DEFAULT { " (default)" } else { "" };
            format!("{:<24} {:>6} tokens{}", m.as_str(), m.context_length(), marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# pplx Configuration
# ==================

# API base URL. Override to route through a proxy.
base_url = "https://api.perplexity.ai"

# Overall per-request timeout in seconds (1-600)
timeout_seconds = 60

# Complete Authorization header value. Prefer the PPLX_API_KEY environment
# variable over storing the key here.
# api_key = "Bearer pplx-..."

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn models_subcommand_with_default_config_path() {
        let cli = Cli::parse_from(["pplx", "models"]);
        assert_eq!(cli.config, "pplx.toml");
        assert!(matches!(cli.command, Command::Models));
    }

    #[test]
    fn config_subcommand_with_output() {
        let cli = Cli::parse_from(["pplx", "config", "-o", "my-config.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config { output: Some(ref path) } if path == "my-config.toml"
        ));
    }

    #[test]
    fn chat_args_map_to_options() {
        let cli = Cli::parse_from([
            "pplx",
            "chat",
            "Why is the sky blue?",
            "--system",
            "Be brief.",
            "--model",
            "pplx-7b-online",
            "--max-tokens",
            "100",
            "--temperature",
            "0.5",
            "--top-k",
            "5",
        ]);
        let Command::Chat(args) = cli.command else {
            panic!("expected chat subcommand");
        };
        let options = args.to_options();

        assert_eq!(options.model, "pplx-7b-online");
        assert_eq!(options.messages.len(), 2);
        assert_eq!(options.messages[0], ChatMessage::system("Be brief."));
        assert_eq!(options.messages[1], ChatMessage::user("Why is the sky blue?"));
        assert_eq!(options.max_tokens, Some(100));
        assert_eq!(options.temperature, Some(0.5));
        assert_eq!(options.top_k, 5);
        assert!(!options.stream);
    }

    #[test]
    fn temperature_and_top_p_conflict_at_parse_time() {
        let result = Cli::try_parse_from([
            "pplx",
            "chat",
            "hi",
            "--temperature",
            "0.5",
            "--top-p",
            "0.5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn authorization_value_adds_scheme_once() {
        assert_eq!(authorization_value("abc"), "Bearer abc");
        assert_eq!(authorization_value("Bearer abc"), "Bearer abc");
        assert_eq!(authorization_value(" abc\n"), "Bearer abc");
    }

    #[test]
    fn model_listing_marks_default() {
        let listing = model_listing();
        assert_eq!(listing.lines().count(), ModelType::ALL.len());
        let default_line = listing
            .lines()
            .find(|l| l.contains("(default)"))
            .expect("default model should be marked");
        assert!(default_line.starts_with("mistral-7b-instruct"));
    }

    #[test]
    fn template_is_valid_toml() {
        let result: Result<toml::Value, _> = toml::from_str(generate_config_template());
        assert!(
            result.is_ok(),
            "Template should be valid TOML: {:?}",
            result.err()
        );
    }
}
