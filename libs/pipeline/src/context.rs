use preprocessing::{FrequencyTable, Vocabulary};

/// Accumulator for a single pipeline run. A new one is made per run so nothing leaks between
/// runs.
#[derive(Debug, Default)]
pub struct RunContext {
    frequencies: FrequencyTable,
    tokens: Vec<String>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one script's tokens. The script is counted on its own first and then merged in.
    pub fn accumulate(&mut self, tokens: Vec<String>) {
        self.frequencies.merge(FrequencyTable::from_tokens(&tokens));
        self.tokens.extend(tokens);
    }

    pub fn finish(self) -> (Vocabulary, FrequencyTable) {
        let vocabulary = Vocabulary::build(self.tokens, &self.frequencies);
        (vocabulary, self.frequencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn sums_occurrences_across_scripts() {
        let mut context = RunContext::new();
        context.accumulate(tokens(&["shark", "boat", "shark", "shark"]));
        context.accumulate(tokens(&["shark", "shark", "island"]));

        let (vocabulary, frequencies) = context.finish();
        assert_eq!(frequencies.get("shark"), Some(5));
        assert_eq!(frequencies.get("boat"), Some(1));
        assert!(vocabulary.contains("shark"));
        assert!(!vocabulary.contains("boat"));
        assert!(!vocabulary.contains("island"));
    }

    #[test]
    fn script_order_does_not_matter() {
        let a = tokens(&["x", "y", "x"]);
        let b = tokens(&["y", "z"]);

        let mut forward = RunContext::new();
        forward.accumulate(a.clone());
        forward.accumulate(b.clone());
        let mut backward = RunContext::new();
        backward.accumulate(b);
        backward.accumulate(a);

        assert_eq!(forward.finish(), backward.finish());
    }
}
