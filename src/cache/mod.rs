//! TTL-gated news cache: the stateful top of the ingestion pipeline.
//!
//! Owns the merged item list, the search index and the refresh policy.
//! The items/index/timestamp triple lives in one [`Snapshot`] swapped
//! atomically behind an `RwLock`, so readers never observe a partially
//! rebuilt index. A separate refresh lock serializes refresh cycles;
//! readers arriving mid-refresh either wait on that lock or keep serving
//! the previous snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::app::{EstuaryError, Result};
use crate::domain::{NewsItem, Source};
use crate::ingest::Ingestor;
use crate::memo::BoundedMemo;
use crate::merge::merge;
use crate::search::SearchIndex;

pub const QUERY_CACHE_CAPACITY: usize = 256;

/// One complete refresh result.
pub struct Snapshot {
    pub items: Vec<NewsItem>,
    pub refreshed_at: DateTime<Utc>,
    index: SearchIndex,
    by_id: HashMap<String, usize>,
}

pub struct NewsCache {
    ingestor: Ingestor,
    sources: Vec<Source>,
    ttl_secs: i64,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    refresh_lock: Mutex<()>,
    query_cache: Mutex<BoundedMemo<Vec<Vec<String>>, Vec<usize>>>,
}

impl NewsCache {
    /// `ttl_secs` of zero or less makes every read refresh.
    pub fn new(ingestor: Ingestor, sources: Vec<Source>, ttl_secs: i64) -> Self {
        Self {
            ingestor,
            sources,
            ttl_secs,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            query_cache: Mutex::new(BoundedMemo::new(QUERY_CACHE_CAPACITY)),
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Return the cached snapshot, refreshing first when stale or never
    /// populated.
    pub async fn get_items(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }
        self.refresh_locked().await
    }

    /// Re-run the refresh pipeline regardless of TTL.
    pub async fn force_refresh(&self) -> Result<Arc<Snapshot>> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Search the current snapshot; never triggers a refresh. An empty
    /// query returns every cached item in its existing order.
    pub async fn search(&self, query: &str) -> Vec<NewsItem> {
        let Some(snapshot) = self.current().await else {
            return Vec::new();
        };

        let groups = snapshot.index.query_groups(query);
        if groups.is_empty() {
            return snapshot.items.clone();
        }

        if let Some(positions) = self.query_cache.lock().await.get(&groups) {
            return positions
                .into_iter()
                .filter(|&pos| pos < snapshot.items.len())
                .map(|pos| snapshot.items[pos].clone())
                .collect();
        }

        let positions = snapshot.index.matching_positions(&groups);
        let results = positions
            .iter()
            .map(|&pos| snapshot.items[pos].clone())
            .collect();
        self.query_cache.lock().await.insert(groups, positions);
        results
    }

    pub async fn get_item(&self, id: &str) -> Option<NewsItem> {
        let snapshot = self.current().await?;
        snapshot
            .by_id
            .get(id)
            .map(|&pos| snapshot.items[pos].clone())
    }

    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.current().await.map(|s| s.refreshed_at)
    }

    async fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().await.clone()
    }

    async fn fresh(&self) -> Option<Arc<Snapshot>> {
        self.current()
            .await
            .filter(|s| (Utc::now() - s.refreshed_at).num_seconds() < self.ttl_secs)
    }

    /// Runs the full pipeline. Caller must hold `refresh_lock`.
    async fn refresh_locked(&self) -> Result<Arc<Snapshot>> {
        if self.sources.is_empty() {
            return Err(EstuaryError::NoSources);
        }

        let per_source = self.ingestor.refresh_all(&self.sources).await;
        let mut items = merge(per_source);

        // A cold start that yields nothing at all is a hard error and
        // leaves the cache unpopulated, so the next read retries. Once
        // populated, an all-failed cycle degrades to the empty result.
        if items.is_empty() && self.current().await.is_none() {
            return Err(EstuaryError::EmptyRefresh(self.sources.len()));
        }

        let mut index = SearchIndex::new();
        index.rebuild(&mut items);
        let by_id = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();

        let snapshot = Arc::new(Snapshot {
            items,
            refreshed_at: Utc::now(),
            index,
            by_id,
        });

        *self.snapshot.write().await = Some(snapshot.clone());
        self.query_cache.lock().await.clear();

        tracing::info!(
            items = snapshot.items.len(),
            sources = self.sources.len(),
            "news cache refreshed"
        );
        Ok(snapshot)
    }
}
