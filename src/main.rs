mod config;
mod geocode;
mod models;
mod pacing;
mod pipeline;
mod scrapers;

use config::Config;
use geocode::NominatimGeocoder;
use scrapers::BlocoListingScraper;
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🎉 Bloco Scout - Carnaval BH 2026 Scraper");
    info!("==========================================");

    let config = Config::default();
    let source = BlocoListingScraper::new(&config)?;
    let geocoder = NominatimGeocoder::new(&config)?;

    let blocos = pipeline::run(&source, &geocoder, &config).await;

    // Save to the JSON file the map front end consumes
    let json = serde_json::to_string_pretty(&blocos)?;
    if let Some(parent) = config.output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&config.output_path, json).await?;

    info!(
        "💾 Done! Saved {} blocks to {}",
        blocos.len(),
        config.output_path.display()
    );

    Ok(())
}
