use catalog_search::cli::Cli;
use catalog_search::engine::{Engine, EngineConfig};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    catalog_search::tracing::init();

    let cli = Cli::parse();

    let engine = Arc::new(Engine::new(EngineConfig {
        filter_capacity: cli.filter_capacity,
        filter_error_rate: cli.filter_error_rate,
    }));

    if let Err(e) = catalog_search::server::serve(cli.bind, engine).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
