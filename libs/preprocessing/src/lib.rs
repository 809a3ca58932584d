pub mod indexer;
pub mod lemmatizer;
pub mod normalizer;
pub mod resources;
pub mod tokenizer;

pub use indexer::{FrequencyTable, Vocabulary};
pub use lemmatizer::{Lemmatizer, MorphyLemmatizer};
pub use normalizer::{normalize, NormalizeError};
pub use resources::{ResourceError, Resources};
pub use tokenizer::{default_stopwords, tokenize};

/// Turns raw dialogue into the token sequence used for indexing.
/// Joining the tokens with single spaces gives the stored processed dialogue.
pub fn preprocess_dialogue(
    dialogue: &str,
    resources: &Resources,
) -> Result<Vec<String>, NormalizeError> {
    let normalized = normalize(dialogue, &resources.english_words)?;
    Ok(tokenize(
        &normalized,
        &resources.stopwords,
        resources.lemmatizer.as_ref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn resources(words: &[&str]) -> Resources {
        let english_words = words.iter().map(|w| w.to_string()).collect::<HashSet<_>>();
        let lemmatizer = MorphyLemmatizer::new(english_words.clone());
        Resources::new(english_words, default_stopwords(), Box::new(lemmatizer))
    }

    #[test]
    fn preprocesses_greeting() {
        let resources = resources(&["hello", "world"]);
        let tokens = preprocess_dialogue("Hello, world! 123", &resources).unwrap();
        assert_eq!(tokens, vec!["hello", "world", "123"]);
        assert_eq!(tokens.join(" "), "hello world 123");
    }

    #[test]
    fn preprocesses_script_lines() {
        let resources = resources(&[
            "the", "sharks", "shark", "are", "circling", "boats", "boat", "get", "out", "of",
            "water",
        ]);
        let tokens = preprocess_dialogue(
            "The sharks are circling the boats!\nGET OUT of the water.",
            &resources,
        )
        .unwrap();
        // "boats\nget" collapses into a single non-english word
        assert_eq!(tokens, vec!["shark", "circling", "water"]);
    }

    #[test]
    fn same_dialogue_same_tokens() {
        let resources = resources(&["i", "ll", "be", "back", "eventually"]);
        let dialogue = "I'll be back. Eventually, I'll be back 2";
        assert_eq!(
            preprocess_dialogue(dialogue, &resources).unwrap(),
            preprocess_dialogue(dialogue, &resources).unwrap()
        );
    }
}
