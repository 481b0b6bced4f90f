use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod pipeline;
mod registry;
mod server;
mod stats;
mod store;
mod summarizer;

use crate::config::Config;
use crate::registry::ModelRegistry;
use crate::server::AppState;
use crate::store::RatingStore;
use crate::summarizer::Summarizer;

/// LLM Summarizer Showdown - compare two models' summaries and collect ratings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an optional TOML configuration file
    config: Option<PathBuf>,

    /// Host to bind, overriding the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose output - log every upstream model call
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // A missing .env is fine; the environment may already carry the keys
    let dotenv = dotenvy::dotenv();
    init_tracing(args.verbose);
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let registry = Arc::new(ModelRegistry::new(config.models.clone()));
    let summarizer = Summarizer::new(&config, Arc::clone(&registry));
    if !summarizer.has_hosted_credentials() {
        tracing::warn!(
            env_var = %config.hosted.env_var_api_key,
            "hosted API key not set; hosted models will fail"
        );
    }

    let state = AppState::new(registry, summarizer, RatingStore::new());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server::serve(listener, state).await
}
