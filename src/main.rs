//! Voice Notes MCP Server - Main Entry Point
//!
//! This is the main entry point for the voice-notes MCP server application.
//! The actual implementation is in the `voice_notes_mcp` library.

use anyhow::Result;
use clap::Parser;
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use voice_notes_mcp::NoteServerHandler;
use voice_notes_mcp::config::ConfigFile;

/// Voice Notes MCP Server - structured analysis of voice-note transcripts via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "voice-notes.toml")]
    config: PathBuf,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for analysis (overrides the config file)
    #[arg(long)]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible API (overrides the config file)
    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigFile::new(&args.config).load()?;
    config.apply_overrides(args.api_key, args.model, args.base_url);

    // stdout carries MCP frames, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        model = %config.completion.model,
        base_url = %config.completion.base_url,
        "starting voice-notes MCP server"
    );

    let handler = NoteServerHandler::from_config(&config);
    serve_stdio(handler).await?;
    Ok(())
}
