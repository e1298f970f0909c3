use crate::config::{Config, BROWSER_ACCEPT};
use crate::extract;
use crate::schema::TrendingRecord;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// The trending page refuses obvious bots, so it is requested with the header
/// set a desktop browser would send.
pub fn browser_headers(config: &Config) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&config.browser_user_agent) {
        Ok(agent) => {
            headers.insert(USER_AGENT, agent);
        }
        Err(e) => warn!("ignoring unusable browser user agent: {e}"),
    }
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers
}

/// Scrape the trending page; any failure along the way yields an empty list.
pub async fn fetch_trending(
    client: &Client,
    config: &Config,
    max_results: usize,
) -> Vec<TrendingRecord> {
    debug!("GET {}", config.trending_url);
    let response = match client
        .get(&config.trending_url)
        .headers(browser_headers(config))
        .timeout(config.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!("trending page request failed | {e}");
            return vec![];
        }
    };

    if response.status() != StatusCode::OK {
        warn!("trending page returned {}; no data", response.status());
        return vec![];
    }

    match response.text().await {
        Ok(html) => extract::extract(&html, max_results),
        Err(e) => {
            warn!("trending page body unreadable | {e}");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_look_like_a_browser() {
        let headers = browser_headers(&Config::default());
        assert!(headers[USER_AGENT].to_str().unwrap().starts_with("Mozilla/5.0 (Windows"));
        assert_eq!(headers[CACHE_CONTROL], "max-age=0");
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
    }

    #[test]
    fn bad_user_agent_is_dropped() {
        let config = Config {
            browser_user_agent: "bad\nagent".to_string(),
            ..Config::default()
        };
        let headers = browser_headers(&config);
        assert!(headers.get(USER_AGENT).is_none());
        assert_eq!(headers.len(), 2);
    }
}
