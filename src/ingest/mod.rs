//! Concurrent multi-source ingestion.
//!
//! One task per configured source, bounded by a semaphore. Each source is
//! fully isolated: fetch or parse failures log a warning and contribute an
//! empty list, never aborting the cycle. Merging and deduplication happen
//! downstream.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::{NewsItem, Source};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

pub const DEFAULT_CONCURRENCY: usize = 10;

pub struct Ingestor {
    fetcher: Arc<dyn Fetcher>,
    normalizer: Normalizer,
    semaphore: Arc<Semaphore>,
    items_per_source: usize,
}

impl Ingestor {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        normalizer: Normalizer,
        max_concurrency: usize,
        items_per_source: usize,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            semaphore: Arc::new(Semaphore::new(max_concurrency.max(1))),
            items_per_source,
        }
    }

    /// Fetch and normalize every source concurrently. The output is one
    /// list per source with no ordering guarantee among sources.
    pub async fn refresh_all(&self, sources: &[Source]) -> Vec<Vec<NewsItem>> {
        let mut handles = Vec::with_capacity(sources.len());

        for source in sources.iter().cloned() {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let normalizer = self.normalizer.clone();
            let cap = self.items_per_source;

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("Semaphore closed");
                ingest_source(fetcher.as_ref(), &normalizer, &source, cap).await
            }));
        }

        futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    Vec::new()
                }
            })
            .collect()
    }
}

async fn ingest_source(
    fetcher: &dyn Fetcher,
    normalizer: &Normalizer,
    source: &Source,
    cap: usize,
) -> Vec<NewsItem> {
    let body = match fetcher.fetch(&source.url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(source = %source.name, error = %e, "fetch failed, source skipped this cycle");
            return Vec::new();
        }
    };

    let feed = match feed_rs::parser::parse(&body[..]) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!(source = %source.name, error = %e, "unparseable feed, source skipped this cycle");
            return Vec::new();
        }
    };

    // Feeds are newest-first, so the cap truncates the oldest entries.
    let items: Vec<NewsItem> = feed
        .entries
        .into_iter()
        .take(cap)
        .filter_map(|entry| normalizer.normalize(&source.name, entry))
        .collect();

    tracing::debug!(source = %source.name, count = items.len(), "source ingested");
    items
}
