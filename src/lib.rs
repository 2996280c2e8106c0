//! # Estuary
//!
//! A news aggregator core: many syndication feeds merged into a single
//! deduplicated, time-ordered, searchable stream.
//!
//! ## Architecture
//!
//! One refresh cycle runs the pipeline:
//!
//! ```text
//! Fetcher (disk TTL cache) → feed-rs → Normalizer → Merge → SearchIndex
//! ```
//!
//! - [`fetcher`]: HTTP client with retries plus a disk-backed TTL cache
//!   of raw feed bytes
//! - [`normalizer`]: converts parsed entries into canonical items
//! - [`ingest`]: concurrent fan-out over all sources, each isolated
//! - [`merge`]: global ordering and link-based deduplication
//! - [`search`]: inverted token index, Cyrillic/Latin aware
//! - [`cache`]: TTL-gated snapshot owner exposed to the presentation layer

/// Application context and error handling.
pub mod app;

/// TTL-gated news cache: items, index and refresh policy.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration: defaults, optional TOML file, `ESTUARY_*` environment
/// overrides, accent palette.
pub mod config;

/// Core domain models.
///
/// - [`Source`](domain::Source): one configured feed
/// - [`NewsItem`](domain::NewsItem): canonical item with a SHA-256
///   link-derived identity
pub mod domain;

/// Feed fetching: retrying HTTP client and the raw-feed disk cache.
pub mod fetcher;

/// Concurrent multi-source ingestion with per-source failure isolation.
pub mod ingest;

/// Bounded memoization used by the search and translation caches.
pub mod memo;

/// Merging and deduplication of per-source item lists.
pub mod merge;

/// Entry normalization: markup hygiene, image resolution, identity.
pub mod normalizer;

/// Inverted token index with transliteration-aware conjunctive queries.
pub mod search;

/// Best-effort translation collaborator.
pub mod translate;
