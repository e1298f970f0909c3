use crate::cache::Cache;
use crate::config::Config;
use crate::schema::{PricePoint, SearchHit, TrendingRecord};
use crate::search::fetch_search;
use crate::series::{fetch_series, Retry};
use crate::trending::fetch_trending;
use anyhow::Result;
use reqwest::Client;

type SeriesKey = (String, Option<String>, Retry);

/// Entry point for every upstream call the dashboard makes.
///
/// Owns the HTTP client and one response cache per operation, so repeating a
/// call with the same arguments is answered from memory for the rest of the
/// process.
#[derive(Debug, Clone)]
pub struct DexClient {
    http: Client,
    config: Config,
    trending: Cache<usize, Vec<TrendingRecord>>,
    search: Cache<(String, usize), Vec<SearchHit>>,
    series: Cache<SeriesKey, Vec<PricePoint>>,
}

impl DexClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: Config) -> Self {
        Self {
            http,
            config,
            trending: Cache::new(),
            search: Cache::new(),
            series: Cache::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Top `max_results` rows of the trending page.
    pub async fn trending(&self, max_results: usize) -> Vec<TrendingRecord> {
        self.trending
            .get_or_fetch(max_results, || {
                fetch_trending(&self.http, &self.config, max_results)
            })
            .await
    }

    /// Up to `max_results` pairs matching `query`.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit> {
        self.search
            .get_or_fetch((query.to_string(), max_results), || {
                fetch_search(&self.http, &self.config, query, max_results)
            })
            .await
    }

    /// Price history of a pair (with `pair_id`) or a coin (without).
    pub async fn series(
        &self,
        chain_or_coin_id: &str,
        pair_id: Option<&str>,
        retry: Retry,
    ) -> Vec<PricePoint> {
        let key = (
            chain_or_coin_id.to_string(),
            pair_id.map(str::to_string),
            retry,
        );
        self.series
            .get_or_fetch(key, || {
                fetch_series(&self.http, &self.config, chain_or_coin_id, pair_id, retry)
            })
            .await
    }

    /// [`series()`] with the retry policy from the configuration.
    ///
    /// [`series()`]: #method.series
    pub async fn series_default(&self, chain_or_coin_id: &str, pair_id: Option<&str>) -> Vec<PricePoint> {
        let retry = Retry {
            attempts: self.config.retries,
            delay: self.config.retry_delay,
        };
        self.series(chain_or_coin_id, pair_id, retry).await
    }
}
