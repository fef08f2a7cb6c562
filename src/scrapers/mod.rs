pub mod listing;
pub mod normalize;
pub mod traits;

pub use listing::BlocoListingScraper;
pub use traits::ListingSource;
