use crate::config::Config;
use crate::de::{de_change, de_opt_object, de_opt_string, window};
use crate::schema::SearchHit;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

/// Query the search API by name or symbol, returning at most `max_results` hits.
///
/// A non-200 status, a transport error or an unreadable body all yield an
/// empty list.
pub async fn fetch_search(
    client: &Client,
    config: &Config,
    query: &str,
    max_results: usize,
) -> Vec<SearchHit> {
    debug!("GET {} q={query:?}", config.search_url);
    let response = match client
        .get(&config.search_url)
        .query(&[("q", query)])
        .header(USER_AGENT, &config.user_agent)
        .timeout(config.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!("search request for {query:?} failed | {e}");
            return vec![];
        }
    };

    if response.status() != StatusCode::OK {
        warn!("search for {query:?} returned {}; no results", response.status());
        return vec![];
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("search body unreadable | {e}");
            return vec![];
        }
    };

    parse_hits(&body, max_results)
}

/// Decode a search response body into at most `max_results` hits.
///
/// Pairs are decoded one at a time; an element that is not a pair object is
/// skipped with a warning and the rest are kept.
pub fn parse_hits(body: &str, max_results: usize) -> Vec<SearchHit> {
    let pairs = match serde_json::from_str::<SearchResponse>(body) {
        Ok(response) => response.into_pairs(),
        Err(e) => {
            warn!("search body is not a list of pairs | {e}");
            return vec![];
        }
    };

    pairs
        .into_iter()
        .filter_map(|pair| match serde_json::from_value::<DexPair>(pair) {
            Ok(pair) => Some(SearchHit::from(pair)),
            Err(e) => {
                warn!("skipping malformed search pair | {e}");
                None
            }
        })
        .take(max_results)
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Either a bare array of pairs, or the envelope served by the public API:
//
// {
//   "schemaVersion": "1.0.0",
//   "pairs": [
//     {
//       "chainId": "solana",
//       "pairAddress": "Czfq3xZZDmsdGdUyrNLtRhGc47cXcZtLG4crryfu44zE",
//       "baseToken": { "address": "...", "name": "Wrapped SOL", "symbol": "SOL" },
//       "priceUsd": "150.12",
//       "priceChange": { "m5": 0.1, "h1": -0.4, "h6": 1.2, "h24": 3.5 },
//       "info": { "imageUrl": "https://..." }
//     },
//     ...
//   ]
// }
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SearchResponse {
    Pairs(Vec<serde_json::Value>),
    Envelope {
        #[serde(default)]
        pairs: Option<Vec<serde_json::Value>>,
    },
}

impl SearchResponse {
    fn into_pairs(self) -> Vec<serde_json::Value> {
        match self {
            SearchResponse::Pairs(pairs) => pairs,
            SearchResponse::Envelope { pairs } => pairs.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    #[serde(default, deserialize_with = "de_opt_string")]
    chain_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pair_address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_object")]
    base_token: Option<BaseToken>,
    #[serde(default, deserialize_with = "de_opt_string")]
    price_usd: Option<String>,
    #[serde(default, deserialize_with = "de_change")]
    price_change_24h: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "de_change")]
    price_change: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "de_change")]
    price_change_7d: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "de_opt_object")]
    info: Option<PairInfo>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct BaseToken {
    #[serde(default, deserialize_with = "de_opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    symbol: Option<String>,
    #[serde(default, rename = "logoURI", deserialize_with = "de_opt_string")]
    logo_uri: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PairInfo {
    #[serde(default, deserialize_with = "de_opt_string")]
    image_url: Option<String>,
}

impl From<DexPair> for SearchHit {
    fn from(pair: DexPair) -> Self {
        let base = pair.base_token.unwrap_or_default();

        // an explicit 24h field wins over the generic change field
        let pct_change_24h = pair
            .price_change_24h
            .as_ref()
            .and_then(|v| window(v, "h24"))
            .or_else(|| pair.price_change.as_ref().and_then(|v| window(v, "h24")));
        let pct_change_7d = pair
            .price_change_7d
            .as_ref()
            .and_then(|v| window(v, "d7"))
            .or_else(|| match &pair.price_change {
                Some(v @ serde_json::Value::Object(_)) => window(v, "d7"),
                _ => None,
            });

        SearchHit {
            rank: None,
            chain: pair.chain_id,
            pair_id: pair.pair_address,
            token_logo_url: base
                .logo_uri
                .or_else(|| pair.info.and_then(|info| info.image_url)),
            base_symbol: base.symbol,
            base_name: base.name,
            price_usd: pair.price_usd,
            pct_change_24h,
            pct_change_7d,
        }
    }
}
