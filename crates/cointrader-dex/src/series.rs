use crate::config::Config;
use crate::schema::PricePoint;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Which upstream resource a time-series request is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesTarget {
    /// A DEX pair on a chain; answered with `{"pair": {"priceHistory": [...]}}`.
    Pair { chain: String, pair_id: String },
    /// A listed coin id; answered with `{"prices": [...]}`.
    Coin { id: String },
}

impl SeriesTarget {
    pub fn new(chain_or_coin_id: &str, pair_id: Option<&str>) -> Self {
        match pair_id {
            Some(pair_id) => SeriesTarget::Pair {
                chain: chain_or_coin_id.to_string(),
                pair_id: pair_id.to_string(),
            },
            None => SeriesTarget::Coin {
                id: chain_or_coin_id.to_string(),
            },
        }
    }
}

/// Retry policy for rate limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Retry {
    /// Upper bound on HTTP attempts.
    pub attempts: u32,
    /// Fixed pause after each `429 Too Many Requests`.
    pub delay: Duration,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Fetch the price history of a pair (when `pair_id` is given) or a coin.
///
/// At most `retry.attempts` requests are made. A 429 waits `retry.delay` and
/// tries again; any other failure ends the loop at once. Every failure mode
/// comes back as an empty series.
pub async fn fetch_series(
    client: &Client,
    config: &Config,
    chain_or_coin_id: &str,
    pair_id: Option<&str>,
    retry: Retry,
) -> Vec<PricePoint> {
    let target = SeriesTarget::new(chain_or_coin_id, pair_id);

    for attempt in 1..=retry.attempts {
        let request = match &target {
            SeriesTarget::Pair { chain, pair_id } => client.get(config.pair_chart_url(chain, pair_id)),
            SeriesTarget::Coin { id } => client.get(config.coin_chart_url(id)).query(&[
                ("vs_currency", config.vs_currency.clone()),
                ("days", config.chart_days.to_string()),
            ]),
        };

        debug!("{target:?} | attempt {attempt}/{}", retry.attempts);
        let response = match request
            .header(USER_AGENT, &config.user_agent)
            .timeout(config.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("{target:?} | request failed | {e}");
                return vec![];
            }
        };

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(
                    "{target:?} | rate limited, backing off for {} seconds",
                    retry.delay.as_secs()
                );
                tokio::time::sleep(retry.delay).await;
                continue;
            }
            StatusCode::OK => {}
            status => {
                warn!("{target:?} | returned {status}; no chart data");
                return vec![];
            }
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("{target:?} | body unreadable | {e}");
                return vec![];
            }
        };

        return parse_history(&target, &body);
    }

    warn!("{target:?} | gave up after {} attempts", retry.attempts);
    vec![]
}

/// Decode the history carried by a chart response body.
pub fn parse_history(target: &SeriesTarget, body: &str) -> Vec<PricePoint> {
    let history = match target {
        SeriesTarget::Pair { .. } => serde_json::from_str::<PairChart>(body)
            .map(|chart| chart.pair.and_then(|pair| pair.price_history)),
        SeriesTarget::Coin { .. } => {
            serde_json::from_str::<CoinChart>(body).map(|chart| chart.prices)
        }
    };

    match history {
        Ok(Some(points)) => {
            trace!("{target:?} | {} price points", points.len());
            points
        }
        Ok(None) => {
            debug!("{target:?} | response carries no price history");
            vec![]
        }
        Err(e) => {
            warn!("{target:?} | undecodable chart body | {e}");
            vec![]
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

// {
//   "pair": {
//     "priceHistory": [
//       [1718000000000, 1.52],     // [epoch ms, price]
//       ...
//     ]
//   }
// }
#[derive(Deserialize, Debug)]
struct PairChart {
    #[serde(default)]
    pair: Option<PairHistory>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PairHistory {
    #[serde(default)]
    price_history: Option<Vec<PricePoint>>,
}

// {
//   "prices": [[1718000000000, 67012.4], ...],
//   "market_caps": [...],
//   "total_volumes": [...]
// }
#[derive(Deserialize, Debug)]
struct CoinChart {
    #[serde(default)]
    prices: Option<Vec<PricePoint>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> SeriesTarget {
        SeriesTarget::new("solana", Some("AbC"))
    }

    #[test]
    fn target_from_arguments() {
        assert_eq!(
            pair(),
            SeriesTarget::Pair {
                chain: "solana".into(),
                pair_id: "AbC".into()
            }
        );
        assert_eq!(
            SeriesTarget::new("bitcoin", None),
            SeriesTarget::Coin { id: "bitcoin".into() }
        );
    }

    #[test]
    fn pair_history_in_upstream_order() {
        let body = r#"{"pair":{"priceHistory":[[1000,1.5],[2000,1.6]]}}"#;
        assert_eq!(
            parse_history(&pair(), body),
            vec![PricePoint::new(1000, 1.5), PricePoint::new(2000, 1.6)]
        );
    }

    #[test]
    fn coin_history() {
        let body = r#"{"prices":[[1,100.0],[2,101.5]],"market_caps":[],"total_volumes":[]}"#;
        assert_eq!(
            parse_history(&SeriesTarget::new("bitcoin", None), body),
            vec![PricePoint::new(1, 100.0), PricePoint::new(2, 101.5)]
        );
    }

    #[test]
    fn missing_or_empty_history() {
        assert!(parse_history(&pair(), r#"{"pair":{"priceHistory":[]}}"#).is_empty());
        assert!(parse_history(&pair(), r#"{"pair":{}}"#).is_empty());
        assert!(parse_history(&pair(), r#"{"pair":null}"#).is_empty());
        assert!(parse_history(&pair(), r#"{}"#).is_empty());
        assert!(parse_history(&pair(), "<html>").is_empty());
    }
}
