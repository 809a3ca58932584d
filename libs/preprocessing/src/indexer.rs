use std::collections::{btree_map, BTreeMap, BTreeSet};

/// Corpus-wide occurrence count per token.
///
/// Every occurrence counts, so a token said five times in one script contributes five.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        table.record(tokens);
        table
    }

    pub fn record<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if let Some(count) = self.counts.get_mut(token) {
                *count += 1;
            } else {
                self.counts.insert(token.to_owned(), 1);
            }
        }
    }

    /// Folds another table into this one. Order of merges does not matter.
    pub fn merge(&mut self, other: FrequencyTable) {
        for (token, count) in other.counts {
            self.counts
                .entry(token)
                .and_modify(|v| *v += count)
                .or_insert(count);
        }
    }

    /// Sets the count for a token, replacing whatever was there.
    pub fn insert(&mut self, token: String, count: u64) {
        self.counts.insert(token, count);
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// Seen at least twice. Unknown tokens and hapaxes are not.
    pub fn is_recurring(&self, token: &str) -> bool {
        self.get(token).map_or(false, |count| count >= 2)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.counts.iter()
    }
}

impl FromIterator<(String, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Deduplicated set of tokens with every corpus hapax removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: BTreeSet<String>,
}

impl Vocabulary {
    /// Only tokens counted at least twice are kept, so hapaxes are dropped as noise. The same
    /// filter is applied whether the tokens come from a fresh pass or from the stores on disk.
    pub fn build<I, S>(tokens: I, frequencies: &FrequencyTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String> + AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .filter(|t| frequencies.is_recurring(t.as_ref()))
            .map(Into::into)
            .collect::<BTreeSet<String>>();
        Self { tokens }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_occurrence() {
        let mut table = FrequencyTable::new();
        table.record(["shark", "boat", "shark", "shark"]);
        table.record(["shark", "shark", "water"]);
        assert_eq!(table.get("shark"), Some(5));
        assert_eq!(table.get("boat"), Some(1));
        assert_eq!(table.get("water"), Some(1));
        assert_eq!(table.get("island"), None);
    }

    #[test]
    fn merge_is_order_independent() {
        let a = FrequencyTable::from_tokens(["x", "x", "x", "y"]);
        let b = FrequencyTable::from_tokens(["x", "x", "z"]);

        let mut ab = FrequencyTable::new();
        ab.merge(a.clone());
        ab.merge(b.clone());
        let mut ba = FrequencyTable::new();
        ba.merge(b);
        ba.merge(a);

        assert_eq!(ab, ba);
        assert_eq!(ab.get("x"), Some(5));
    }

    #[test]
    fn vocabulary_excludes_hapax() {
        let tokens = vec!["shark", "boat", "shark", "water", "boat", "island"];
        let table = FrequencyTable::from_tokens(tokens.clone());
        let vocabulary = Vocabulary::build(tokens, &table);

        assert_eq!(
            vocabulary.iter().cloned().collect::<Vec<String>>(),
            vec!["boat", "shark"]
        );
        for (token, count) in &table {
            if *count == 1 {
                assert!(!vocabulary.contains(token));
            }
        }
    }

    #[test]
    fn vocabulary_needs_two_occurrences() {
        let mut table = FrequencyTable::from_tokens(["boat", "boat"]);
        table.insert("zero".to_owned(), 0);
        let vocabulary = Vocabulary::build(["boat", "zero", "ghost"], &table);

        assert!(vocabulary.contains("boat"));
        assert!(!vocabulary.contains("zero"));
        assert!(!vocabulary.contains("ghost"));
    }

    #[test]
    fn rebuilding_a_vocabulary_is_stable() {
        let tokens = vec!["a", "b", "b", "c", "c", "c"];
        let table = FrequencyTable::from_tokens(tokens.clone());
        let first = Vocabulary::build(tokens, &table);
        let second = Vocabulary::build(first.iter().cloned(), &table);
        assert_eq!(first, second);
    }
}
