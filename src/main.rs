//! pplx command-line client
//!
//! Sends one chat completion per invocation using the library client.

use clap::Parser;
use pplx::cli::{self, ChatArgs, Cli, Command};
use pplx::{Client, ClientConfig, telemetry};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if Path::new(&cli.config).exists() {
        ClientConfig::from_file(&cli.config)?
    } else {
        ClientConfig::default()
    };

    telemetry::init(&config.observability.log_level);

    match cli.command {
        Command::Chat(args) => chat(&config, args).await?,
        Command::Models => println!("{}", cli::model_listing()),
        Command::Config { output } => match output {
            Some(path) => {
                std::fs::write(&path, cli::generate_config_template())?;
                tracing::info!(path = %path, "Wrote configuration template");
            }
            None => print!("{}", cli::generate_config_template()),
        },
    }

    Ok(())
}

async fn chat(config: &ClientConfig, args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new(config)?;

    match args.api_key.as_deref() {
        Some(key) => client.set_api_key(cli::authorization_value(key)).await,
        None if config.api_key().is_none() => {
            return Err("no API key: pass --api-key, set PPLX_API_KEY, or add api_key to the config file".into());
        }
        None => {}
    }

    let response = client.chat_complete(args.to_options()).await?;

    for choice in &response.choices {
        println!("{}", choice.message.content());
        if choice.is_truncated() {
            tracing::warn!(index = choice.index, "Reply was cut off by max_tokens");
        }
    }

    if let Some(usage) = response.usage {
        tracing::info!(
            model = %response.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Completion finished"
        );
    }

    Ok(())
}
