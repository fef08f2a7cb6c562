use crate::config::Config;
use crate::geocode::Geocode;
use crate::models::{Bloco, ADDRESS_TBD};
use crate::pacing::Pacer;
use crate::scrapers::listing::extract_blocos;
use crate::scrapers::ListingSource;
use tracing::info;

/// Walk the listing pages in order, accumulating every extracted record.
///
/// Paging halts at the first page with no marker elements, or at the page
/// ceiling. A fetch failure surfaces as an empty page and therefore also
/// halts paging; the source gives no way to tell a transient error apart
/// from the true end of the listing.
pub async fn collect_blocos(source: &dyn ListingSource, config: &Config) -> Vec<Bloco> {
    let mut all_blocos = Vec::new();
    let mut pacer = Pacer::new(config.page_cooldown);

    for page in 0..config.max_pages {
        pacer.pace().await;
        info!("Scraping page {}...", page);

        let blocos = extract_blocos(&source.fetch_page(page).await);
        if blocos.is_empty() {
            info!("No blocks found, or end of pages reached");
            break;
        }
        all_blocos.extend(blocos);
    }

    all_blocos
}

/// Resolve coordinates for every record, in place.
///
/// Records whose venue is still unannounced get the city-center fallback
/// directly, with no lookup and no pacing. Everything else goes through the
/// geocoder, paced to respect Nominatim's request-rate policy.
pub async fn geocode_blocos(blocos: &mut [Bloco], geocoder: &dyn Geocode, config: &Config) {
    let total = blocos.len();
    let mut pacer = Pacer::new(config.geocode_cooldown);

    for (i, bloco) in blocos.iter_mut().enumerate() {
        let coordinates = if bloco.address == ADDRESS_TBD {
            config.fallback
        } else {
            info!("[{}/{}] Geocoding: {}...", i + 1, total, bloco.name);
            pacer.pace().await;
            geocoder.resolve(&bloco.address, &bloco.neighborhood).await
        };
        bloco.latitude = coordinates.latitude;
        bloco.longitude = coordinates.longitude;
    }
}

/// Full pipeline: page through the listing, then geocode the collection.
pub async fn run(
    source: &dyn ListingSource,
    geocoder: &dyn Geocode,
    config: &Config,
) -> Vec<Bloco> {
    let mut blocos = collect_blocos(source, config).await;
    info!("Found {} blocks in total", blocos.len());
    info!("Starting geocoding (this can take a while)...");

    geocode_blocos(&mut blocos, geocoder, config).await;
    blocos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixturePages {
        pages: HashMap<u32, String>,
    }

    impl FixturePages {
        fn new(pages: &[(u32, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(n, html)| (*n, html.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl ListingSource for FixturePages {
        async fn fetch_page(&self, page: u32) -> String {
            self.pages.get(&page).cloned().unwrap_or_default()
        }
    }

    struct FixedGeocoder {
        coordinates: Coordinates,
        calls: AtomicUsize,
    }

    impl FixedGeocoder {
        fn new(latitude: f64, longitude: f64) -> Self {
            Self {
                coordinates: Coordinates {
                    latitude,
                    longitude,
                },
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Geocode for FixedGeocoder {
        async fn resolve(&self, _address: &str, _neighborhood: &str) -> Coordinates {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.coordinates
        }
    }

    const BLOCO_X: &str = r#"
        <div class="favorito-icon" data-id="123" data-titulo="Bloco X"
             data-data="15/02/2026" data-hora="14:00"
             data-local="Rua A, Centro"></div>
    "#;

    const BLOCO_TBD: &str = r#"
        <div class="favorito-icon" data-id="999" data-titulo="Bloco Surpresa"
             data-data="16/02/2026" data-hora="09:00"
             data-local="A definir"></div>
    "#;

    #[tokio::test(start_paused = true)]
    async fn single_page_record_comes_out_fully_populated() {
        let source = FixturePages::new(&[(0, BLOCO_X)]);
        let geocoder = FixedGeocoder::new(-19.93, -43.94);
        let config = Config::default();

        let blocos = run(&source, &geocoder, &config).await;

        assert_eq!(blocos.len(), 1);
        let bloco = &blocos[0];
        assert_eq!(bloco.id, "123");
        assert_eq!(bloco.name, "Bloco X");
        assert_eq!(bloco.date, "2026-02-15");
        assert_eq!(bloco.time, "14:00");
        assert_eq!(bloco.address, "Rua A");
        assert_eq!(bloco.neighborhood, "Centro");
        assert_eq!(bloco.notes, "Carnaval 2026");
        assert_eq!(bloco.latitude, -19.93);
        assert_eq!(bloco.longitude, -43.94);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn paging_halts_at_the_first_empty_page() {
        let source = FixturePages::new(&[(0, BLOCO_X), (1, BLOCO_X), (3, BLOCO_X)]);
        let config = Config::default();

        // Page 2 is empty, so page 3 is never reached.
        let blocos = collect_blocos(&source, &config).await;
        assert_eq!(blocos.len(), 2);
    }

    struct EndlessPages {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl ListingSource for EndlessPages {
        async fn fetch_page(&self, _page: u32) -> String {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            BLOCO_X.to_string()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn paging_stops_at_the_page_ceiling() {
        let source = EndlessPages {
            fetches: AtomicUsize::new(0),
        };
        let config = Config::default();

        // No page ever comes back empty, so only the ceiling halts paging.
        let blocos = collect_blocos(&source, &config).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 42);
        assert_eq!(blocos.len(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_first_page_yields_an_empty_json_array() {
        let source = FixturePages::new(&[]);
        let geocoder = FixedGeocoder::new(-19.93, -43.94);
        let config = Config::default();

        let blocos = run(&source, &geocoder, &config).await;
        assert!(blocos.is_empty());
        assert_eq!(serde_json::to_string_pretty(&blocos).unwrap(), "[]");
    }

    #[tokio::test(start_paused = true)]
    async fn unannounced_venue_skips_the_geocoder() {
        let source = FixturePages::new(&[(0, BLOCO_TBD)]);
        let geocoder = FixedGeocoder::new(1.0, 2.0);
        let config = Config::default();

        let blocos = run(&source, &geocoder, &config).await;

        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(blocos[0].latitude, -19.9167);
        assert_eq!(blocos[0].longitude, -43.9345);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_runs_produce_identical_json() {
        let pages = [(0, BLOCO_X), (1, BLOCO_TBD)];
        let config = Config::default();

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let source = FixturePages::new(&pages);
            let geocoder = FixedGeocoder::new(-19.93, -43.94);
            let blocos = run(&source, &geocoder, &config).await;
            outputs.push(serde_json::to_string_pretty(&blocos).unwrap());
        }

        assert_eq!(outputs[0], outputs[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn serialized_records_use_the_consumer_field_names() {
        let source = FixturePages::new(&[(0, BLOCO_X)]);
        let geocoder = FixedGeocoder::new(-19.93, -43.94);
        let config = Config::default();

        let blocos = run(&source, &geocoder, &config).await;
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&blocos).unwrap()).unwrap();

        let record = &json[0];
        for key in [
            "id",
            "nome",
            "data",
            "horario",
            "endereco",
            "bairro",
            "observacoes",
            "latitude",
            "longitude",
        ] {
            assert!(record.get(key).is_some(), "missing key: {}", key);
        }
    }
}
