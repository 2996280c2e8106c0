use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::app::Result;
use crate::cache::NewsCache;
use crate::config::Config;
use crate::fetcher::cache::{CachedFetcher, DiskCache};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::ingest::Ingestor;
use crate::normalizer::Normalizer;
use crate::translate::Translator;

/// Wires the pipeline together: disk-cached fetcher, ingestor, news
/// cache and translator, all driven by one resolved [`Config`].
pub struct AppContext {
    pub config: Config,
    pub cache: NewsCache,
    pub translator: Translator,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let http = HttpFetcher::new(timeout);
        let disk = DiskCache::new(config.cache_dir.clone(), config.cache_ttl_secs)?;
        let fetcher: Arc<dyn Fetcher> = Arc::new(CachedFetcher::new(http, disk));

        let ingestor = Ingestor::new(
            fetcher,
            Normalizer::new(),
            config.max_concurrency,
            config.items_per_source,
        );
        let cache = NewsCache::new(ingestor, config.sources.clone(), config.cache_ttl_secs);

        let translate_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        let translator = Translator::new(translate_client);

        Ok(Self {
            config,
            cache,
            translator,
        })
    }
}
