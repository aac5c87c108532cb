use std::path::PathBuf;

use clap::Parser;

/// Terminal chat over `OpenAI`, Anthropic and Gemini
#[derive(Debug, Parser)]
#[command(name = "chatstream", about = "Stream chat replies from OpenAI, Anthropic or Gemini")]
pub struct Args {
    /// Path to an optional settings file (endpoints, telemetry)
    #[arg(short, long, env = "CHATSTREAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// System prompt seeded at the start of the conversation; empty for none
    #[arg(short, long, default_value = "You are a helpful assistant.")]
    pub system: String,

    /// Send a single message, print the reply, and exit
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Print the provider-shaped request instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter directives
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    pub log_filter: String,
}
