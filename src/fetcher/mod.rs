pub mod cache;
pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Retrieves the raw bytes of one feed URL.
///
/// Implementations return a typed error on failure; callers treat a failed
/// source as absent for the current cycle rather than aborting the refresh.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
