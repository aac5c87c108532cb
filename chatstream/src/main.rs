#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod repl;
mod session;

use args::Args;
use chatstream_config::{Config, ProcessEnv};
use chatstream_llm::{Message, StreamOrchestrator, format_request};
use clap::Parser;
use session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref(), &ProcessEnv)?;

    // Initialize telemetry
    let _telemetry_guard = chatstream_telemetry::init(&config.telemetry, &args.log_filter)?;

    tracing::info!(
        provider = %config.model.provider,
        model = %config.model.model,
        temperature = config.model.temperature,
        max_tokens = config.model.max_tokens,
        "starting chatstream"
    );

    if args.dry_run {
        return dry_run(&config, &args);
    }

    let orchestrator = StreamOrchestrator::from_config(&config)?;
    let session = Session::new(orchestrator, &args.system);

    match args.prompt {
        Some(prompt) => repl::once(session, prompt).await,
        None => repl::run(session).await,
    }
}

/// Print the request the configured provider would receive
fn dry_run(config: &Config, args: &Args) -> anyhow::Result<()> {
    let mut history = session::seed_history(&args.system);
    if let Some(prompt) = &args.prompt {
        history.push(Message::user(prompt.clone()));
    }

    let request = format_request(&history, config.model.provider)?;
    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}
