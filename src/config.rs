use std::path::PathBuf;
use std::time::Duration;

use crate::models::Coordinates;

/// Process-wide immutable configuration, built once in `main` and passed
/// explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing endpoint; pages are addressed with a `page` query parameter.
    pub listing_url: String,
    /// Nominatim search endpoint.
    pub geocoder_url: String,
    /// Where the aggregated JSON lands, relative to the working directory.
    pub output_path: PathBuf,
    /// City/state/country suffix appended to every geocoding query to bias
    /// results toward the target city.
    pub region: String,
    /// Central reference point of the city, used whenever geocoding cannot
    /// produce a better answer.
    pub fallback: Coordinates,
    /// Upper bound on listing pages; paging normally halts earlier, on the
    /// first empty page.
    pub max_pages: u32,
    /// Minimum spacing between listing page fetches.
    pub page_cooldown: Duration,
    /// Minimum spacing between Nominatim lookups (their rate policy is
    /// 1 req/sec; stay just above it).
    pub geocode_cooldown: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url:
                "https://portalbelohorizonte.com.br/carnaval/2026/programacao/bloco-de-rua"
                    .to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org/search".to_string(),
            output_path: PathBuf::from("data/blocos_scraped.json"),
            region: "Belo Horizonte, MG, Brazil".to_string(),
            fallback: Coordinates {
                latitude: -19.9167,
                longitude: -43.9345,
            },
            max_pages: 42,
            page_cooldown: Duration::from_secs(1),
            geocode_cooldown: Duration::from_millis(1100),
        }
    }
}
