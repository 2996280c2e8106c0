//! Configuration for the aggregator.
//!
//! Settings resolve in three layers: built-in defaults, an optional
//! `~/.config/estuary/config.toml`, and `ESTUARY_*` environment variables
//! (highest precedence). Every setting has a default, so the binary runs
//! with no configuration at all.

pub mod colors;

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::Source;

pub const DEFAULT_TARGET_LANG: &str = "ru";
pub const DEFAULT_CACHE_TTL_SECS: i64 = 900;
pub const DEFAULT_ITEMS_PER_SOURCE: usize = 50;
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Language the presentation layer translates into.
    pub target_lang: String,
    /// Raw-feed cache TTL. Zero or negative means every read refreshes.
    pub cache_ttl_secs: i64,
    /// Entries consumed per source, taken from the front of the feed.
    pub items_per_source: usize,
    /// Directory holding one cache file per source URL.
    pub cache_dir: PathBuf,
    /// Ceiling on concurrent source fetches per refresh cycle.
    pub max_concurrency: usize,
    pub request_timeout_secs: u64,
    pub sources: Vec<Source>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            items_per_source: DEFAULT_ITEMS_PER_SOURCE,
            cache_dir: default_cache_dir(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            sources: default_sources(),
        }
    }
}

/// On-disk representation; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    target_lang: Option<String>,
    cache_ttl_secs: Option<i64>,
    items_per_source: Option<usize>,
    cache_dir: Option<PathBuf>,
    max_concurrency: Option<usize>,
    request_timeout_secs: Option<u64>,
    sources: Option<Vec<Source>>,
}

impl Config {
    /// Load configuration from the default path, then apply environment
    /// overrides. A missing config file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                let mut config = Self::default();
                config.apply_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        let mut config = Self::default();
        if let Some(lang) = file.target_lang {
            config.target_lang = lang;
        }
        if let Some(ttl) = file.cache_ttl_secs {
            config.cache_ttl_secs = ttl;
        }
        if let Some(cap) = file.items_per_source {
            config.items_per_source = cap;
        }
        if let Some(dir) = file.cache_dir {
            config.cache_dir = dir;
        }
        if let Some(ceiling) = file.max_concurrency {
            config.max_concurrency = ceiling;
        }
        if let Some(timeout) = file.request_timeout_secs {
            config.request_timeout_secs = timeout;
        }
        if let Some(sources) = file.sources {
            config.sources = sources;
        }

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Default config file path: `~/.config/estuary/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("estuary").join("config.toml"))
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(lang) = get("ESTUARY_TARGET_LANG") {
            self.target_lang = lang;
        }
        if let Some(ttl) = parse_override(&get, "ESTUARY_CACHE_TTL") {
            self.cache_ttl_secs = ttl;
        }
        if let Some(cap) = parse_override(&get, "ESTUARY_ITEMS_PER_SOURCE") {
            self.items_per_source = cap;
        }
        if let Some(dir) = get("ESTUARY_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(ceiling) = parse_override(&get, "ESTUARY_MAX_CONCURRENCY") {
            self.max_concurrency = ceiling;
        }
        if let Some(timeout) = parse_override(&get, "ESTUARY_REQUEST_TIMEOUT") {
            self.request_timeout_secs = timeout;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for source in &self.sources {
            Url::parse(&source.url).map_err(|e| ConfigError::InvalidSource {
                name: source.name.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(
    get: impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = get(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable override");
            None
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("estuary"))
        .unwrap_or_else(|| std::env::temp_dir().join("estuary"))
}

/// World-news feeds the binary ships with; replaced wholesale by a
/// `[[sources]]` table in the config file.
pub fn default_sources() -> Vec<Source> {
    [
        ("BBC News", "https://feeds.bbci.co.uk/news/world/rss.xml"),
        ("Al Jazeera", "https://www.aljazeera.com/xml/rss/all.xml"),
        ("Jerusalem Post", "https://www.jpost.com/rss/rssfeedsfrontpage.aspx"),
        ("Haaretz", "https://rsshub.app/haaretz/english"),
        ("Times of Israel", "https://www.timesofisrael.com/feed/"),
        ("Kyiv Independent", "https://kyivindependent.com/feed/"),
        ("Guardian World", "https://www.theguardian.com/world/rss"),
        ("Associated Press", "https://apnews.com/hub/ap-top-news?outputType=rss"),
        ("Deutsche Welle", "https://rss.dw.com/rdf/rss-en-all"),
        ("Sky News", "https://feeds.skynews.com/feeds/rss/world.xml"),
        ("France 24", "https://www.france24.com/en/rss"),
        ("The New York Times", "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml"),
        ("TASS", "https://tass.com/rss/v2.xml"),
        ("The Moscow Times", "https://www.themoscowtimes.com/rss/news"),
        ("CBC", "https://www.cbc.ca/cmlink/rss-topstories"),
        ("The Japan Times", "https://www.japantimes.co.jp/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| Source::new(name, url))
    .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid URL for source \"{name}\": {source}")]
    InvalidSource {
        name: String,
        source: url::ParseError,
    },
}
