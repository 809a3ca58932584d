use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use thiserror::Error;

use crate::{
    lemmatizer::{Lemmatizer, MorphyLemmatizer},
    tokenizer::default_stopwords,
};

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("could not read {path:?}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("{0:?} does not contain any words")]
    Empty(PathBuf),
    #[error("{path:?} line {line}: expected `<inflected> <base>`")]
    MalformedException { path: PathBuf, line: usize },
}

/// Everything the text pipeline needs besides the dialogue itself.
pub struct Resources {
    pub english_words: HashSet<String>,
    pub stopwords: HashSet<String>,
    pub lemmatizer: Box<dyn Lemmatizer>,
}

impl Resources {
    pub fn new(
        english_words: HashSet<String>,
        stopwords: HashSet<String>,
        lemmatizer: Box<dyn Lemmatizer>,
    ) -> Self {
        Self {
            english_words,
            stopwords,
            lemmatizer,
        }
    }

    /// Loads the word list (one word per line) and builds a noun lemmatizer over it.
    /// Without a stopword file the built-in english list is used.
    pub fn load(
        words_path: &Path,
        stopwords_path: Option<&Path>,
        exceptions_path: Option<&Path>,
    ) -> Result<Self, ResourceError> {
        let english_words = read_word_list(words_path)?;
        let stopwords = match stopwords_path {
            Some(path) => read_word_list(path)?,
            None => default_stopwords(),
        };
        let mut lemmatizer = MorphyLemmatizer::new(english_words.clone());
        if let Some(path) = exceptions_path {
            lemmatizer = lemmatizer.with_exceptions(read_exceptions(path)?);
        }
        debug!(
            "Loaded {} english words and {} stopwords",
            english_words.len(),
            stopwords.len()
        );
        Ok(Self::new(english_words, stopwords, Box::new(lemmatizer)))
    }
}

fn read_file(path: &Path) -> Result<String, ResourceError> {
    fs::read_to_string(path).map_err(|source| ResourceError::Unreadable {
        path: path.to_owned(),
        source,
    })
}

fn read_word_list(path: &Path) -> Result<HashSet<String>, ResourceError> {
    let words = read_file(path)?
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect::<HashSet<String>>();
    if words.is_empty() {
        return Err(ResourceError::Empty(path.to_owned()));
    }
    Ok(words)
}

fn read_exceptions(path: &Path) -> Result<HashMap<String, String>, ResourceError> {
    let mut exceptions = HashMap::new();
    for (idx, line) in read_file(path)?.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(inflected), Some(base)) => {
                exceptions.insert(inflected.to_lowercase(), base.to_lowercase());
            }
            _ => {
                return Err(ResourceError::MalformedException {
                    path: path.to_owned(),
                    line: idx + 1,
                })
            }
        }
    }
    Ok(exceptions)
}
