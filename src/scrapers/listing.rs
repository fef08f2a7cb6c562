use crate::config::Config;
use crate::models::{Bloco, ADDRESS_TBD, NAME_PLACEHOLDER, NOTES_TAG};
use crate::scrapers::normalize::{reformat_date, split_neighborhood};
use crate::scrapers::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Scraper for the portalbelohorizonte.com.br bloco listing
pub struct BlocoListingScraper {
    client: Client,
    listing_url: String,
}

impl BlocoListingScraper {
    /// Create a new listing scraper from the process configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            listing_url: config.listing_url.clone(),
        })
    }

    async fn get_page(&self, page: u32) -> Result<String> {
        let response = self
            .client
            .get(&self.listing_url)
            .query(&[("page", page)])
            .send()
            .await
            .context("Failed to fetch listing page")?;

        if !response.status().is_success() {
            anyhow::bail!("Listing returned status: {}", response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML for page {}", html.len(), page);
        Ok(html)
    }
}

#[async_trait]
impl ListingSource for BlocoListingScraper {
    async fn fetch_page(&self, page: u32) -> String {
        match self.get_page(page).await {
            Ok(html) => html,
            Err(e) => {
                // A transient network blip is indistinguishable from the true
                // end of the listing here; both halt paging upstream.
                warn!("Error loading page {}: {:#}", page, e);
                String::new()
            }
        }
    }
}

/// Extract every bloco record from one page of listing HTML.
///
/// Each `div.favorito-icon` marker element encodes one event in its
/// `data-*` attributes. Missing attributes degrade to placeholders, so a
/// malformed element yields a placeholder-heavy record instead of dropping
/// the rest of the page.
pub fn extract_blocos(html: &str) -> Vec<Bloco> {
    let document = Html::parse_document(html);
    let marker = Selector::parse("div.favorito-icon").unwrap();

    let mut blocos = Vec::new();
    for element in document.select(&marker) {
        let attr = |name: &str| element.value().attr(name).map(str::to_string);

        let name = attr("data-titulo").unwrap_or_else(|| NAME_PLACEHOLDER.to_string());
        let date = attr("data-data").unwrap_or_default();
        let time = attr("data-hora").unwrap_or_else(|| "00:00".to_string());
        // Not guaranteed unique when two id-less markers land in the same
        // millisecond; the source offers nothing better to key on.
        let id = attr("data-id")
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());
        let full_address = attr("data-local").unwrap_or_else(|| ADDRESS_TBD.to_string());

        let (address, neighborhood) = split_neighborhood(&full_address);

        blocos.push(Bloco {
            id,
            name,
            date: reformat_date(&date),
            time,
            address,
            neighborhood,
            notes: NOTES_TAG.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        });
    }

    blocos
}
