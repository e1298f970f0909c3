use crate::schema::TrendingRecord;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Markup patterns
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

lazy_static! {
    /// Patterns matching the trending table markup currently served by DEX Screener.
    pub static ref DEXSCREENER: RowPatterns = RowPatterns::dexscreener();
}

/// Every markup pattern the extractor knows about.
///
/// The container pattern isolates one table row; the field patterns are each
/// searched for independently inside that row, with the first capture group
/// taken as the value.
#[derive(Debug, Clone)]
pub struct RowPatterns {
    pub container: Regex,
    pub pair_id: Regex,
    pub rank: Regex,
    pub chain: Regex,
    pub logo: Regex,
    pub base_symbol: Regex,
    pub base_name: Regex,
    pub price: Regex,
    pub pct_change_24h: Regex,
}

impl RowPatterns {
    pub fn dexscreener() -> Self {
        // the patterns are literals; a failure here is a typo, not a runtime condition
        let re = |pattern: &str| Regex::new(pattern).expect("static markup pattern");
        Self {
            container: re(r#"(?s)<a class="ds-dex-table-row ds-dex-table-row-top" href="[^"]*".*?</a>"#),
            pair_id: re(r#"href="/[^/"]+/([^"]+)""#),
            rank: re(r#"<span class="ds-dex-table-row-badge-pair-no">#\s*?(\d+)</span>"#),
            chain: re(r#"<img class="ds-dex-table-row-chain-icon"[^>]*title="([^"]+)""#),
            logo: re(r#"<img class="ds-dex-table-row-token-icon-img"[^>]*src="([^"]+)""#),
            base_symbol: re(r#"<span class="ds-dex-table-row-base-token-symbol">([^<]+)</span>"#),
            base_name: re(r#"<span class="ds-dex-table-row-base-token-name-text">([^<]+)</span>"#),
            price: re(r#"<div class="ds-dex-table-row-col-price">\s*\$\s*([^<]+)</div>"#),
            pct_change_24h: re(
                r#"<div class="ds-dex-table-row-col-price-change-h24"><span[^>]*>([^<]+)</span></div>"#,
            ),
        }
    }

    /// Pull up to `max_results` rows out of `html`, in document order.
    pub fn extract(&self, html: &str, max_results: usize) -> Vec<TrendingRecord> {
        let records: Vec<TrendingRecord> = self
            .container
            .find_iter(html)
            .take(max_results)
            .map(|fragment| self.record(fragment.as_str()))
            .collect();
        trace!("extracted {} trending rows", records.len());
        records
    }

    fn record(&self, fragment: &str) -> TrendingRecord {
        TrendingRecord {
            rank: capture(&self.rank, fragment).and_then(|r| r.parse().ok()),
            chain: capture(&self.chain, fragment),
            pair_id: capture(&self.pair_id, fragment),
            token_logo_url: capture(&self.logo, fragment),
            base_symbol: capture(&self.base_symbol, fragment),
            base_name: capture(&self.base_name, fragment),
            price_usd: capture(&self.price, fragment),
            pct_change_24h: capture(&self.pct_change_24h, fragment),
        }
    }
}

impl Default for RowPatterns {
    fn default() -> Self {
        Self::dexscreener()
    }
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract trending rows with the default DEX Screener patterns.
pub fn extract(html: &str, max_results: usize) -> Vec<TrendingRecord> {
    DEXSCREENER.extract(html, max_results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: u32, chain: &str, pair: &str, symbol: &str, name: &str) -> String {
        format!(
            r#"<a class="ds-dex-table-row ds-dex-table-row-top" href="/{chain}/{pair}">
  <span class="ds-dex-table-row-badge-pair-no">#{rank}</span>
  <img class="ds-dex-table-row-chain-icon" src="/chains/{chain}.png" title="{chain}">
  <img class="ds-dex-table-row-token-icon-img" loading="lazy" src="https://cdn.example/{symbol}.png">
  <span class="ds-dex-table-row-base-token-symbol">{symbol}</span>
  <span class="ds-dex-table-row-base-token-name-text">{name}</span>
  <div class="ds-dex-table-row-col-price">$ 0.001234</div>
  <div class="ds-dex-table-row-col-price-change-h24"><span class="ds-change-perc">12.5%</span></div>
</a>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><div class=\"ds-dex-table\">{}</div></body></html>",
            rows.join("\n")
        )
    }

    #[test]
    fn no_rows_no_records() {
        assert!(extract("<html><body>nothing here</body></html>", 10).is_empty());
        assert!(extract("", 10).is_empty());
    }

    #[test]
    fn full_row_is_parsed() {
        let html = page(&[row(1, "solana", "AbC123", "PEPE", "Pepe Coin")]);
        let records = extract(&html, 10);
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.rank, Some(1));
        assert_eq!(r.chain.as_deref(), Some("solana"));
        assert_eq!(r.pair_id.as_deref(), Some("AbC123"));
        assert_eq!(r.token_logo_url.as_deref(), Some("https://cdn.example/PEPE.png"));
        assert_eq!(r.base_symbol.as_deref(), Some("PEPE"));
        assert_eq!(r.base_name.as_deref(), Some("Pepe Coin"));
        assert_eq!(r.price_usd.as_deref(), Some("0.001234"));
        assert_eq!(r.pct_change_24h.as_deref(), Some("12.5%"));
    }

    #[test]
    fn capped_at_max_results_in_document_order() {
        let rows: Vec<String> = (1..=6)
            .map(|i| row(i, "ethereum", &format!("0xpair{i}"), &format!("T{i}"), "Token"))
            .collect();
        let records = extract(&page(&rows), 4);
        assert_eq!(records.len(), 4);
        let ranks: Vec<_> = records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3), Some(4)]);

        assert!(extract(&page(&rows), 0).is_empty());
    }

    #[test]
    fn missing_fields_become_none() {
        let html = r#"<a class="ds-dex-table-row ds-dex-table-row-top" href="/base/0xdead">
            <span class="ds-dex-table-row-base-token-symbol">ONLY</span>
        </a>"#;
        let records = extract(html, 10);
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.pair_id.as_deref(), Some("0xdead"));
        assert_eq!(r.base_symbol.as_deref(), Some("ONLY"));
        assert_eq!(r.rank, None);
        assert_eq!(r.chain, None);
        assert_eq!(r.token_logo_url, None);
        assert_eq!(r.base_name, None);
        assert_eq!(r.price_usd, None);
        assert_eq!(r.pct_change_24h, None);
    }

    #[test]
    fn malformed_fragment_is_skipped() {
        let broken = r#"<a class="ds-dex-table-row" href="/bsc/0xnope">
            <span class="ds-dex-table-row-base-token-symbol">NOPE</span></a>"#
            .to_string();
        let rows = vec![
            row(1, "solana", "p1", "AAA", "A"),
            broken,
            row(2, "solana", "p2", "BBB", "B"),
            row(3, "base", "p3", "CCC", "C"),
        ];
        let records = extract(&page(&rows), 10);
        assert_eq!(records.len(), 3);
        let symbols: Vec<_> = records.iter().filter_map(|r| r.base_symbol.clone()).collect();
        assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn custom_patterns_can_be_swapped_in() {
        let patterns = RowPatterns {
            container: Regex::new(r"(?s)<tr>.*?</tr>").unwrap(),
            base_symbol: Regex::new(r"<td>([^<]+)</td>").unwrap(),
            ..RowPatterns::default()
        };
        let records = patterns.extract("<table><tr><td>XYZ</td></tr></table>", 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].base_symbol.as_deref(), Some("XYZ"));
        assert_eq!(records[0].chain, None);
    }
}
