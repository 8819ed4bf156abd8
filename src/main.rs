//! llmbot - console front end for the chat bot
//!
//! Reads lines from stdin as private messages from one user and prints the
//! replies. `!join <name>` simulates a member joining the console group.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use llmbot::messaging::ConsoleMessenger;
use llmbot::utils::init_logging;
use llmbot::{BotRuntime, Config, InboundEvent};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const CONSOLE_GROUP: &str = "console";

#[derive(Debug, Parser)]
#[command(name = "llmbot", version, about = "Chat bot for a local Ollama server")]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "LLMBOT_CONFIG", default_value = "config/llmbot.yaml")]
    config: PathBuf,

    /// Log filter directive, e.g. `info` or `llmbot=debug`
    #[arg(long, env = "LLMBOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// User id that console input is attributed to
    #[arg(long, env = "LLMBOT_CONSOLE_USER", default_value = "console")]
    console_user: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config_found = args.config.exists();
    let mut config = if config_found {
        Config::from_file(&args.config)
            .await
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        Config::default()
    }
    .apply_env();

    if let Some(level) = args.log_level {
        config.monitoring.logging.level = level;
    }
    if args.json_logs {
        config.monitoring.logging.json = true;
    }
    config.validate()?;
    init_logging(&config.monitoring.logging)?;

    if !config_found {
        warn!(
            "Configuration file {} not found, using defaults",
            args.config.display()
        );
    }
    info!("Starting {} v{}", llmbot::NAME, llmbot::VERSION);

    let runtime = Arc::new(
        BotRuntime::build(config, Arc::new(ConsoleMessenger::new()))
            .await
            .context("initializing bot runtime")?,
    );
    runtime.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let event = match line.strip_prefix("!join ") {
                    Some(name) => InboundEvent::MemberJoined {
                        group_id: CONSOLE_GROUP.to_string(),
                        group_name: "the console group".to_string(),
                        user_id: name.trim().to_string(),
                        user_name: name.trim().to_string(),
                    },
                    None => InboundEvent::private(args.console_user.clone(), line),
                };

                let runtime = runtime.clone();
                tokio::spawn(async move { runtime.handle(event).await });
            }
        }
    }

    runtime.shutdown().await;
    Ok(())
}
