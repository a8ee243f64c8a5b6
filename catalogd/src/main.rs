use catalogd::{
    AppConfig, Cli,
    impls::{CatalogApp, connect},
};
use catalog_axum::{openapi, start_server};
use std::fs::File;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = &cli.schema {
        serde_json::to_writer_pretty(File::create(path)?, &openapi::<CatalogApp>())?;
        return Ok(());
    }

    let AppConfig { server, database } = AppConfig::load(&cli)?;

    // A failed connection ends the process.
    let db = connect(&database).await?;

    start_server(server, CatalogApp { db }).await?;
    Ok(())
}
