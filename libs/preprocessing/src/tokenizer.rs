use std::collections::HashSet;

use crate::lemmatizer::Lemmatizer;

// NLTK's english list. Apostrophes never survive normalization, the contracted forms are kept
// for callers that tokenize raw text.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

// Fused words the treebank tokenizer splits in two. Only the ones that need no apostrophe can
// still show up after normalization.
const SPLIT_WORDS: &[(&str, &str, &str)] = &[
    ("cannot", "can", "not"),
    ("gimme", "gim", "me"),
    ("gonna", "gon", "na"),
    ("gotta", "got", "ta"),
    ("lemme", "lem", "me"),
    ("wanna", "wan", "na"),
];

pub fn default_stopwords() -> HashSet<String> {
    STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Splits normalized text into tokens, drops stopwords and lemmatizes what is left.
/// Order of the surviving tokens is preserved.
pub fn tokenize(
    normalized: &str,
    stopwords: &HashSet<String>,
    lemmatizer: &dyn Lemmatizer,
) -> Vec<String> {
    normalized
        .split_whitespace()
        .flat_map(split_fused)
        .filter(|w| !stopwords.contains(*w))
        .map(|w| lemmatizer.lemmatize(w))
        .collect()
}

fn split_fused(word: &str) -> Vec<&str> {
    match SPLIT_WORDS.iter().find(|(fused, _, _)| *fused == word) {
        Some(&(_, head, tail)) => vec![head, tail],
        None => vec![word],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::MorphyLemmatizer;

    fn lexicon(list: &[&str]) -> MorphyLemmatizer {
        MorphyLemmatizer::new(list.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn tokenizes_strings() {
        let lemmatizer = lexicon(&["shark", "boat", "bigger"]);
        let tokens = tokenize(
            "we are going to need a bigger boat the sharks are here",
            &default_stopwords(),
            &lemmatizer,
        );
        assert_eq!(
            tokens,
            vec!["going", "need", "bigger", "boat", "shark"]
        );
    }

    #[test]
    fn keeps_tokens_that_are_not_stopwords() {
        let lemmatizer = lexicon(&["hello", "world"]);
        let tokens = tokenize("hello world 123", &default_stopwords(), &lemmatizer);
        assert_eq!(tokens, vec!["hello", "world", "123"]);
    }

    #[test]
    fn splits_fused_words_before_filtering() {
        let lemmatizer = lexicon(&[]);
        let tokens = tokenize("i cannot swim gonna", &default_stopwords(), &lemmatizer);
        assert_eq!(tokens, vec!["swim", "gon", "na"]);
    }

    #[test]
    fn stopword_match_is_exact() {
        let lemmatizer = lexicon(&[]);
        let stopwords: HashSet<String> = ["the".to_owned()].into_iter().collect();
        let tokens = tokenize("the The theory", &stopwords, &lemmatizer);
        assert_eq!(tokens, vec!["The", "theory"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let lemmatizer = lexicon(&["anything"]);
        assert!(tokenize("", &default_stopwords(), &lemmatizer).is_empty());
        assert!(tokenize("the a an", &default_stopwords(), &lemmatizer).is_empty());
    }
}
