use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

pub const TRENDING_URL: &str =
    "https://dexscreener.com/?rankBy=trendingScoreH6&order=desc&ads=1&boosted=1&profile=1";
pub const SEARCH_URL: &str = "https://api.dexscreener.com/latest/dex/search";
pub const PAIR_CHART_URL: &str = "https://io.dexscreener.com/dex/pair-details/v3/{chain}/{pair}";
pub const COIN_CHART_URL: &str = "https://api.coingecko.com/api/v3/coins/{id}/market_chart";

pub const USER_AGENT: &str = "Mozilla/5.0";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36 Edg/137.0.0.0";
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Runtime settings; every field can be overridden with a `COINTRADER_*`
/// environment variable (or a `.env` entry), e.g., `COINTRADER_TOP_N=25`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub trending_url: String,
    pub search_url: String,
    /// Template with `{chain}` & `{pair}` placeholders.
    pub pair_chart_url: String,
    /// Template with an `{id}` placeholder.
    pub coin_chart_url: String,
    pub user_agent: String,
    pub browser_user_agent: String,
    pub top_n: usize,
    pub search_max: usize,
    pub retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
    pub vs_currency: String,
    pub chart_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trending_url: TRENDING_URL.to_string(),
            search_url: SEARCH_URL.to_string(),
            pair_chart_url: PAIR_CHART_URL.to_string(),
            coin_chart_url: COIN_CHART_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            browser_user_agent: BROWSER_USER_AGENT.to_string(),
            top_n: 100,
            search_max: 10,
            retries: 3,
            retry_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(15),
            vs_currency: "usd".to_string(),
            chart_days: 5,
        }
    }
}

impl Config {
    /// Read settings from the process environment; call `dotenv()` first to
    /// have `.env` entries picked up.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Read settings through an arbitrary `key -> value` lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| lookup(&format!("COINTRADER_{suffix}"));
        let defaults = Self::default();

        Ok(Self {
            trending_url: get("TRENDING_URL").unwrap_or(defaults.trending_url),
            search_url: get("SEARCH_URL").unwrap_or(defaults.search_url),
            pair_chart_url: get("PAIR_CHART_URL").unwrap_or(defaults.pair_chart_url),
            coin_chart_url: get("COIN_CHART_URL").unwrap_or(defaults.coin_chart_url),
            user_agent: get("USER_AGENT").unwrap_or(defaults.user_agent),
            browser_user_agent: get("BROWSER_USER_AGENT").unwrap_or(defaults.browser_user_agent),
            top_n: parsed(&get, "TOP_N")?.unwrap_or(defaults.top_n),
            search_max: parsed(&get, "SEARCH_MAX")?.unwrap_or(defaults.search_max),
            retries: parsed(&get, "RETRIES")?.unwrap_or(defaults.retries),
            retry_delay: parsed(&get, "RETRY_DELAY")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_delay),
            timeout: parsed(&get, "TIMEOUT")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            vs_currency: get("VS_CURRENCY").unwrap_or(defaults.vs_currency),
            chart_days: parsed(&get, "CHART_DAYS")?.unwrap_or(defaults.chart_days),
        })
    }

    /// Chart endpoint for a DEX pair.
    pub fn pair_chart_url(&self, chain: &str, pair: &str) -> String {
        self.pair_chart_url
            .replace("{chain}", chain)
            .replace("{pair}", pair)
    }

    /// Chart endpoint for a listed coin id.
    pub fn coin_chart_url(&self, id: &str) -> String {
        self.coin_chart_url.replace("{id}", id)
    }
}

fn parsed<T, G>(get: &G, suffix: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    get(suffix)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("COINTRADER_{suffix}={raw:?} is not a valid value"))
        })
        .transpose()
}
