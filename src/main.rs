//! CLI entry point for scout.

mod cli;

use clap::Parser;
use scout::api::QueryClient;
use scout::app::InteractionLoop;
use scout::config::{load_config, require_api_key};
use scout::context::ContextAssembler;
use scout::router::RouteTable;
use scout::snapshot::DirectorySnapshot;
use scout::ui::{InputReader, Renderer};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if let Some(model) = &args.model {
        config.api.model = model.clone();
    }
    if let Some(url) = &args.base_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if args.no_color {
        config.display.color = false;
    }

    let renderer = Renderer::new(config.display.color);

    // The bearer credential is required up front; fail with guidance.
    if let Err(e) = require_api_key(&config) {
        renderer.error(&e.to_string());
        eprintln!("    export SCOUT_API_KEY='your-api-key-here'");
        std::process::exit(1);
    }

    let initial_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            renderer.error(&format!("cannot determine working directory: {e}"));
            std::process::exit(1);
        }
    };

    let client = Arc::new(QueryClient::new(
        &config.api,
        Duration::from_secs(config.network.api_timeout_secs),
    ));

    renderer.welcome(&config.api.model);

    let mut session = InteractionLoop::new(
        RouteTable::new(),
        DirectorySnapshot::new(initial_dir),
        ContextAssembler::new(config.api.model.clone()),
        client,
        renderer,
        InputReader::stdin(),
    );
    session.run().await;
}
