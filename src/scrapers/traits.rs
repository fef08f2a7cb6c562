use async_trait::async_trait;

/// Common trait for paginated listing sources
/// This keeps the pipeline testable against fixture HTML instead of the live site
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the raw HTML of one listing page.
    ///
    /// Infallible by contract: transport failures are logged by the
    /// implementation and surface as an empty body, which the caller treats
    /// the same as a page with no blocks on it.
    async fn fetch_page(&self, page: u32) -> String;
}
