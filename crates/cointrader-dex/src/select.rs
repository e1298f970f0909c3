use crate::schema::NormalizedCoin;
use std::collections::HashMap;

/// The option shown first in every selection list, meaning "nothing chosen".
pub const NONE_SELECTED: &str = "";

/// Ordered label -> coin mapping for one selection prompt.
///
/// Labels keep the order they were first seen in. A label seen twice keeps its
/// original position but holds the later coin.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: Vec<(String, NormalizedCoin)>,
    index: HashMap<String, usize>,
}

impl Selection {
    pub fn from_coins<I>(coins: I) -> Self
    where
        I: IntoIterator<Item = NormalizedCoin>,
    {
        let mut selection = Self::default();
        for coin in coins {
            selection.insert(coin);
        }
        selection
    }

    pub fn insert(&mut self, coin: NormalizedCoin) {
        match self.index.get(&coin.label) {
            Some(&i) => self.entries[i].1 = coin,
            None => {
                self.index.insert(coin.label.clone(), self.entries.len());
                self.entries.push((coin.label.clone(), coin));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&NormalizedCoin> {
        self.index.get(label).map(|&i| &self.entries[i].1)
    }

    /// Labels as presented to the user, led by [`NONE_SELECTED`].
    pub fn options(&self) -> Vec<&str> {
        std::iter::once(NONE_SELECTED)
            .chain(self.entries.iter().map(|(label, _)| label.as_str()))
            .collect()
    }

    /// Map an index into [`options()`] back to its coin; `0` is "none".
    ///
    /// [`options()`]: #method.options
    pub fn pick(&self, option: usize) -> Option<&NormalizedCoin> {
        option
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|(_, coin)| coin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedCoin> {
        self.entries.iter().map(|(_, coin)| coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalize;
    use crate::schema::TrendingRecord;

    fn coin(name: &str, symbol: &str, chain: &str, pair: &str) -> NormalizedCoin {
        TrendingRecord {
            base_name: Some(name.into()),
            base_symbol: Some(symbol.into()),
            chain: Some(chain.into()),
            pair_id: Some(pair.into()),
            ..TrendingRecord::default()
        }
        .normalize()
    }

    #[test]
    fn duplicate_labels_last_write_wins() {
        let selection = Selection::from_coins(vec![
            coin("Foo", "FOO", "eth", "first"),
            coin("Foo", "FOO", "eth", "second"),
        ]);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("Foo (FOO) — eth").unwrap().pair_id, "second");
    }

    #[test]
    fn first_seen_order_is_kept() {
        let selection = Selection::from_coins(vec![
            coin("B", "B", "eth", "1"),
            coin("A", "A", "eth", "2"),
            coin("B", "B", "eth", "3"),
        ]);
        assert_eq!(
            selection.options(),
            vec![NONE_SELECTED, "B (B) — eth", "A (A) — eth"]
        );
        assert_eq!(selection.pick(1).unwrap().pair_id, "3");
        assert_eq!(selection.pick(2).unwrap().pair_id, "2");
    }

    #[test]
    fn none_option_and_out_of_range() {
        let selection = Selection::from_coins(vec![coin("A", "A", "sol", "x")]);
        assert!(selection.pick(0).is_none());
        assert!(selection.pick(5).is_none());

        let empty = Selection::default();
        assert!(empty.is_empty());
        assert_eq!(empty.options(), vec![NONE_SELECTED]);
    }
}
