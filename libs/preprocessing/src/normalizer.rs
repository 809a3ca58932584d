use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

lazy_static::lazy_static! {
    // Matches are deleted outright, no space is put back: "don't" becomes "dont".
    static ref STRIP_RGX: Regex = Regex::new(r##"[-!"#$%&'()*+,./:;<=>—?@\[\]^_`�{|}~\n]"##).unwrap();
    static ref WORD_PUNCT_RGX: Regex = Regex::new(r"\w+|[^\w\s]+").unwrap();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("english word list is empty, refusing to filter dialogue against it")]
    EmptyWordList,
}

/// Lowercases the dialogue, strips punctuation and drops alphabetic words that are not English.
/// Anything that isn't purely alphabetic (numbers, leftover symbols) is kept as is.
pub fn normalize(dialogue: &str, english_words: &HashSet<String>) -> Result<String, NormalizeError> {
    if english_words.is_empty() {
        return Err(NormalizeError::EmptyWordList);
    }
    let lowered = dialogue.to_lowercase();
    let stripped = STRIP_RGX.replace_all(&lowered, "");
    let kept = WORD_PUNCT_RGX
        .find_iter(&stripped)
        .map(|m| m.as_str())
        .filter(|w| english_words.contains(*w) || !is_alphabetic(w))
        .collect::<Vec<&str>>();
    Ok(kept.join(" "))
}

fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}
