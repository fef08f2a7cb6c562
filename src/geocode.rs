use crate::config::Config;
use crate::models::Coordinates;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// Resolves a venue address to coordinates.
///
/// Infallible by contract: implementations always produce a coordinate,
/// degrading to a fixed city-center fallback when the lookup cannot do
/// better.
#[async_trait]
pub trait Geocode: Send + Sync {
    async fn resolve(&self, address: &str, neighborhood: &str) -> Coordinates;
}

/// One search hit from Nominatim; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Take the first hit of a Nominatim result set, no ranking.
fn first_coordinates(hits: &[NominatimHit]) -> Option<Coordinates> {
    let hit = hits.first()?;
    Some(Coordinates {
        latitude: hit.lat.parse().ok()?,
        longitude: hit.lon.parse().ok()?,
    })
}

/// Geocoder backed by the public Nominatim (OpenStreetMap) search API
pub struct NominatimGeocoder {
    client: Client,
    search_url: String,
    region: String,
    fallback: Coordinates,
}

impl NominatimGeocoder {
    /// Create a new geocoder from the process configuration
    pub fn new(config: &Config) -> Result<Self> {
        // Nominatim's usage policy requires a client-identifying user agent.
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            search_url: config.geocoder_url.clone(),
            region: config.region.clone(),
            fallback: config.fallback,
        })
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>> {
        debug!("Geocoding query: {}", query);
        let hits: Vec<NominatimHit> = self
            .client
            .get(&self.search_url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .context("Failed to reach geocoding service")?
            .json()
            .await
            .context("Failed to decode geocoding response")?;

        Ok(first_coordinates(&hits))
    }
}

#[async_trait]
impl Geocode for NominatimGeocoder {
    async fn resolve(&self, address: &str, neighborhood: &str) -> Coordinates {
        // Always qualify with the city/state/country to bias results.
        let query = format!("{}, {}, {}", address, neighborhood, self.region);
        match self.lookup(&query).await {
            Ok(Some(coordinates)) => return coordinates,
            Ok(None) => {}
            Err(e) => {
                warn!("Error geocoding {}: {:#}", address, e);
                return self.fallback;
            }
        }

        // No hit for the full address; the neighborhood alone is usually
        // still resolvable and good enough for a city map.
        if !neighborhood.is_empty() {
            let query = format!("{}, {}", neighborhood, self.region);
            match self.lookup(&query).await {
                Ok(Some(coordinates)) => return coordinates,
                Ok(None) => {}
                Err(e) => warn!("Error geocoding {}: {:#}", address, e),
            }
        }

        self.fallback
    }
}
