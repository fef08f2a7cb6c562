use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum interval between consecutive network calls.
///
/// `pace` waits until `interval` has elapsed since the previous `pace` call;
/// the first call returns immediately. The pipeline paces before every
/// request to the listing site and to Nominatim, which both expect polite
/// request rates.
pub struct Pacer {
    interval: Duration,
    earliest_next: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            earliest_next: None,
        }
    }

    pub async fn pace(&mut self) {
        if let Some(earliest_next) = self.earliest_next {
            sleep_until(earliest_next).await;
        }
        self.earliest_next = Some(Instant::now() + self.interval);
    }
}
