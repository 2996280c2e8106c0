//! Disk-backed TTL cache for raw feed payloads.
//!
//! One file per source URL, named by the SHA-256 of the URL. Each file
//! holds the fetch timestamp as text, a single `\n`, then the payload
//! bytes. Entries within the TTL are authoritative; no revalidation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::app::Result;
use crate::fetcher::Fetcher;

pub struct DiskCache {
    dir: PathBuf,
    ttl_secs: i64,
}

impl DiskCache {
    /// TTL of zero or less makes every entry read as expired.
    pub fn new(dir: impl Into<PathBuf>, ttl_secs: i64) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, ttl_secs })
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.bin", hex::encode(digest)))
    }

    /// Return the cached payload if the entry is present, well-formed,
    /// non-empty and younger than the TTL. Malformed entries read as
    /// expired rather than erroring.
    pub async fn load(&self, url: &str) -> Option<Vec<u8>> {
        let raw = tokio::fs::read(self.entry_path(url)).await.ok()?;
        let sep = raw.iter().position(|&b| b == b'\n')?;
        let timestamp: i64 = std::str::from_utf8(&raw[..sep]).ok()?.trim().parse().ok()?;
        let payload = &raw[sep + 1..];
        if payload.is_empty() {
            return None;
        }
        let age = Utc::now().timestamp() - timestamp;
        (age < self.ttl_secs).then(|| payload.to_vec())
    }

    /// Overwrite the entry for `url`. Last writer wins; concurrent writers
    /// for the same URL need no coordination beyond that.
    pub async fn store(&self, url: &str, payload: &[u8]) -> Result<()> {
        let mut buf = Vec::with_capacity(payload.len() + 16);
        buf.extend_from_slice(Utc::now().timestamp().to_string().as_bytes());
        buf.push(b'\n');
        buf.extend_from_slice(payload);
        tokio::fs::write(self.entry_path(url), buf).await?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Composes the TTL cache with a network fetcher: within the TTL the
/// cached payload is returned without touching the network; otherwise the
/// inner fetcher runs and its payload overwrites the entry.
pub struct CachedFetcher<F> {
    inner: F,
    cache: DiskCache,
}

impl<F: Fetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: DiskCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(payload) = self.cache.load(url).await {
            tracing::debug!(url, "raw feed cache hit");
            return Ok(payload);
        }

        let payload = self.inner.fetch(url).await?;

        // A failed cache write degrades to uncached operation.
        if let Err(err) = self.cache.store(url, &payload).await {
            tracing::warn!(url, error = %err, "failed to write raw feed cache entry");
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
        body: Vec<u8>,
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path(), 900).unwrap();

        cache.store("https://example.com/feed", b"payload").await.unwrap();
        let loaded = cache.load("https://example.com/feed").await;
        assert_eq!(loaded.as_deref(), Some(b"payload".as_slice()));
    }

    #[tokio::test]
    async fn test_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path(), 900).unwrap();
        assert!(cache.load("https://example.com/feed").await.is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_always_expired() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path(), 0).unwrap();
        cache.store("https://example.com/feed", b"payload").await.unwrap();
        assert!(cache.load("https://example.com/feed").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_reads_as_expired() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path(), 900).unwrap();

        let path = cache.entry_path("https://example.com/feed");
        tokio::fs::write(&path, b"not-a-timestamp\npayload").await.unwrap();
        assert!(cache.load("https://example.com/feed").await.is_none());

        tokio::fs::write(&path, b"no separator at all").await.unwrap();
        assert!(cache.load("https://example.com/feed").await.is_none());

        // timestamp but empty payload
        tokio::fs::write(&path, b"1700000000\n").await.unwrap();
        assert!(cache.load("https://example.com/feed").await.is_none());
    }

    #[tokio::test]
    async fn test_cached_fetcher_skips_network_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CachedFetcher::new(
            CountingFetcher {
                calls: AtomicUsize::new(0),
                body: b"<rss/>".to_vec(),
            },
            DiskCache::new(dir.path(), 900).unwrap(),
        );

        let first = fetcher.fetch("https://example.com/feed").await.unwrap();
        let second = fetcher.fetch("https://example.com/feed").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_fetcher_refetches_after_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CachedFetcher::new(
            CountingFetcher {
                calls: AtomicUsize::new(0),
                body: b"<rss/>".to_vec(),
            },
            DiskCache::new(dir.path(), 0).unwrap(),
        );

        fetcher.fetch("https://example.com/feed").await.unwrap();
        fetcher.fetch("https://example.com/feed").await.unwrap();
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 2);
    }
}
