use crate::schema::{NormalizedCoin, SearchHit, TrendingRecord};

/// Placeholder used wherever a source has nothing to say about a value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Reduce a source record to the common [`NormalizedCoin`] shape.
///
/// [`NormalizedCoin`]: ../schema/struct.NormalizedCoin.html
pub trait Normalize {
    fn normalize(&self) -> NormalizedCoin;
}

/// `"{name} ({symbol}) — {chain}"`
pub fn label(name: &str, symbol: &str, chain: &str) -> String {
    format!("{name} ({symbol}) — {chain}")
}

impl Normalize for TrendingRecord {
    fn normalize(&self) -> NormalizedCoin {
        let name = self.base_name.clone().unwrap_or_default();
        let symbol = self.base_symbol.clone().unwrap_or_default();
        let chain = self.chain.clone().unwrap_or_default();

        NormalizedCoin {
            label: label(&name, &symbol, &chain),
            chain,
            pair_id: self.pair_id.clone().unwrap_or_default(),
            logo: self.token_logo_url.clone(),
            name,
            symbol,
            price_usd: self.price_usd.clone(),
            pct_24h: self.pct_change_24h.clone(),
            // the trending table carries no weekly column
            pct_7d: Some(NOT_AVAILABLE.to_string()),
        }
    }
}

impl Normalize for SearchHit {
    fn normalize(&self) -> NormalizedCoin {
        let name = self
            .base_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        let symbol = self
            .base_symbol
            .as_deref()
            .unwrap_or_default()
            .to_uppercase();
        let chain = self.chain.clone().unwrap_or_default();
        let or_na = |v: &Option<String>| v.clone().or_else(|| Some(NOT_AVAILABLE.to_string()));

        NormalizedCoin {
            label: label(&name, &symbol, &chain),
            chain,
            pair_id: self.pair_id.clone().unwrap_or_default(),
            logo: self.token_logo_url.clone().filter(|l| !l.is_empty()),
            name,
            symbol,
            price_usd: or_na(&self.price_usd),
            pct_24h: or_na(&self.pct_change_24h),
            pct_7d: or_na(&self.pct_change_7d),
        }
    }
}

/// Normalize a whole batch, keeping source order.
pub fn normalize_all<T: Normalize>(records: &[T]) -> Vec<NormalizedCoin> {
    records.iter().map(Normalize::normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_without_a_pair_have_nothing_to_chart() {
        let bare = TrendingRecord {
            chain: Some("solana".into()),
            base_symbol: Some("ABC".into()),
            ..Default::default()
        }
        .normalize();
        assert_eq!(bare.pair_id, "");
        assert_eq!(bare.chart_target(), None);

        let full = TrendingRecord {
            chain: Some("solana".into()),
            pair_id: Some("AbC123".into()),
            ..Default::default()
        }
        .normalize();
        assert_eq!(full.chart_target(), Some(("solana", "AbC123")));
    }

    #[test]
    fn trending_record_label_and_defaults() {
        let record = TrendingRecord {
            rank: Some(3),
            chain: Some("solana".into()),
            pair_id: Some("Pair111".into()),
            token_logo_url: None,
            base_symbol: Some("WIF".into()),
            base_name: Some("dogwifhat".into()),
            price_usd: Some("2.31".into()),
            pct_change_24h: Some("-4.10%".into()),
        };
        let coin = record.normalize();
        assert_eq!(coin.label, "dogwifhat (WIF) — solana");
        assert_eq!(coin.pair_id, "Pair111");
        assert_eq!(coin.logo, None);
        assert_eq!(coin.price_usd.as_deref(), Some("2.31"));
        assert_eq!(coin.pct_24h.as_deref(), Some("-4.10%"));
        assert_eq!(coin.pct_7d.as_deref(), Some(NOT_AVAILABLE));
    }

    #[test]
    fn empty_trending_record_still_normalizes() {
        let coin = TrendingRecord::default().normalize();
        assert_eq!(coin.label, " () — ");
        assert_eq!(coin.price_usd, None);
    }

    #[test]
    fn search_hit_defaults() {
        let hit = SearchHit {
            chain: Some("bsc".into()),
            pair_id: Some("0xabc".into()),
            base_symbol: Some("cake".into()),
            token_logo_url: Some(String::new()),
            ..SearchHit::default()
        };
        let coin = hit.normalize();
        assert_eq!(coin.name, "Unknown");
        assert_eq!(coin.symbol, "CAKE");
        assert_eq!(coin.label, "Unknown (CAKE) — bsc");
        assert_eq!(coin.logo, None);
        assert_eq!(coin.price_usd.as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(coin.pct_24h.as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(coin.pct_7d.as_deref(), Some(NOT_AVAILABLE));
    }

    #[test]
    fn batch_keeps_order() {
        let hits = vec![
            SearchHit { base_name: Some("A".into()), ..SearchHit::default() },
            SearchHit { base_name: Some("B".into()), ..SearchHit::default() },
        ];
        let names: Vec<_> = normalize_all(&hits).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
