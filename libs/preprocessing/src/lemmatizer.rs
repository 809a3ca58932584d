use std::collections::{HashMap, HashSet};

/// Reduces an inflected token to its dictionary form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

// WordNet's detachment rules for nouns, tried in order.
const NOUN_SUFFIX_RULES: [(&str, &str); 8] = [
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

lazy_static::lazy_static! {
    static ref IRREGULAR_NOUNS: HashMap<&'static str, &'static str> = {
        let pairs = [
            ("children", "child"),
            ("feet", "foot"),
            ("geese", "goose"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("lice", "louse"),
            ("oxen", "ox"),
            ("dice", "die"),
            ("wives", "wife"),
            ("knives", "knife"),
            ("lives", "life"),
            ("wolves", "wolf"),
            ("leaves", "leaf"),
            ("halves", "half"),
            ("shelves", "shelf"),
            ("thieves", "thief"),
            ("loaves", "loaf"),
            ("calves", "calf"),
            ("criteria", "criterion"),
            ("phenomena", "phenomenon"),
            ("analyses", "analysis"),
            ("crises", "crisis"),
        ];
        pairs.into_iter().collect()
    };
}

/// Noun-only lemmatizer in the style of WordNet's morphy.
///
/// A candidate form is only accepted when it appears in the lexicon, and the shortest accepted
/// candidate wins. Words with no accepted candidate come back unchanged.
#[derive(Debug, Default, Clone)]
pub struct MorphyLemmatizer {
    lexicon: HashSet<String>,
    exceptions: HashMap<String, String>,
}

impl MorphyLemmatizer {
    pub fn new(lexicon: HashSet<String>) -> Self {
        let exceptions = IRREGULAR_NOUNS
            .iter()
            .map(|(inflected, base)| (inflected.to_string(), base.to_string()))
            .collect();
        Self {
            lexicon,
            exceptions,
        }
    }

    /// Adds (or overrides) irregular forms on top of the built-in table.
    pub fn with_exceptions(mut self, exceptions: HashMap<String, String>) -> Self {
        self.exceptions.extend(exceptions);
        self
    }

    /// An irregular form only competes with the word itself; suffix rules are not tried on it.
    fn candidates(&self, word: &str) -> Vec<String> {
        let mut forms = vec![word.to_owned()];
        if let Some(base) = self.exceptions.get(word) {
            forms.push(base.to_owned());
        } else {
            for (suffix, replacement) in NOUN_SUFFIX_RULES {
                if let Some(stem) = word.strip_suffix(suffix) {
                    if !stem.is_empty() {
                        forms.push(format!("{}{}", stem, replacement));
                    }
                }
            }
        }
        forms
            .into_iter()
            .filter(|f| self.lexicon.contains(f))
            .collect()
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        let mut shortest: Option<String> = None;
        for candidate in self.candidates(token) {
            match &shortest {
                Some(s) if s.chars().count() <= candidate.chars().count() => {}
                _ => shortest = Some(candidate),
            }
        }
        shortest.unwrap_or_else(|| token.to_owned())
    }
}
