//! Stopword lists.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::analyzer::resources::data_lines;
use crate::error::{Error, Result};

/// Words dropped by the lexical filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    /// Parses one word per line.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resource` if a line holds more than one word.
    pub fn parse(source: &str, file: &str) -> Result<Self> {
        let mut words = FxHashSet::default();
        for (line, fields) in data_lines(source) {
            let [word] = fields[..] else {
                return Err(Error::Resource {
                    file: file.to_string(),
                    line,
                    reason: format!("expected 1 word, found {}", fields.len()),
                });
            };
            words.insert(word.to_string());
        }
        Ok(Self { words })
    }

    /// Returns `true` if `word` is a stopword.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Source of stopword sets, queried once per pipeline invocation.
pub trait StopwordSource {
    /// Stopwords for `language`, or `None` if that language is not loaded.
    fn stopwords(&self, language: &str) -> Option<&StopwordSet>;
}

/// A single set answers for every language.
impl StopwordSource for StopwordSet {
    fn stopwords(&self, _language: &str) -> Option<&StopwordSet> {
        Some(self)
    }
}

impl<T: StopwordSource + ?Sized> StopwordSource for Arc<T> {
    fn stopwords(&self, language: &str) -> Option<&StopwordSet> {
        (**self).stopwords(language)
    }
}

/// Stopword sets keyed by language name (`english`, ...).
#[derive(Debug, Clone, Default)]
pub struct StopwordCatalog {
    sets: FxHashMap<String, StopwordSet>,
}

impl StopwordCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the set for `language`.
    pub fn insert(&mut self, language: impl Into<String>, set: StopwordSet) {
        self.sets.insert(language.into(), set);
    }

    /// Loaded language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }
}

impl StopwordSource for StopwordCatalog {
    fn stopwords(&self, language: &str) -> Option<&StopwordSet> {
        self.sets.get(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_one_per_line() {
        let set = StopwordSet::parse("# list\nthe\na\n\nis\n", "english.txt").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(!set.contains("home"));
    }

    #[test]
    fn two_words_on_a_line_rejected() {
        let err = StopwordSet::parse("the\nof the\n", "english.txt").unwrap_err();
        assert!(matches!(err, Error::Resource { line: 2, .. }));
    }

    #[test]
    fn catalog_lookup_by_language() {
        let mut catalog = StopwordCatalog::new();
        catalog.insert("english", ["the", "a"].into_iter().collect());
        catalog.insert("german", ["der"].into_iter().collect());

        assert!(catalog.stopwords("english").is_some_and(|s| s.contains("the")));
        assert!(catalog.stopwords("french").is_none());
        assert_eq!(catalog.languages(), ["english", "german"]);
    }

    #[test]
    fn single_set_serves_any_language() {
        let set: StopwordSet = ["he"].into_iter().collect();
        assert!(set.stopwords("klingon").is_some_and(|s| s.contains("he")));
    }
}
