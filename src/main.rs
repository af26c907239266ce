use crate::config::cli::Command;
use crate::config::Config;
use crate::error::Result;
use crate::services::{store_adapters, Aggregator};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.args.log_level)),
        )
        .init();

    let aggregator = Aggregator::new(store_adapters(config.page_source())?);

    match config.args.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => api::serve(config.args.port, aggregator).await?,
        Command::Search { name } => {
            let game = aggregator.search(&name).await?;
            println!("{}", serde_json::to_string_pretty(&game)?);
        }
        Command::Batch { names } => {
            let games: Vec<Value> = names.into_iter().map(Value::String).collect();
            let response = aggregator.batch_search(&games).await;
            info!("Batch search completed: {} games", response.total);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
