//! Word lexicon and irregular-inflection tables.
//!
//! The [`Lexicon`] gives the tagger a default tag for known words and gives the
//! lemmatizer its vocabulary of base forms. The [`ExceptionTable`] lists
//! inflections no suffix rule can undo (`went` → `go`, `children` → `child`).

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use signa_types::{LemmaMode, PosTag};

use crate::analyzer::resources::data_lines;
use crate::error::{Error, Result};

/// Known words with their possible tags.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, SmallVec<[PosTag; 2]>>,
    verbs: FxHashSet<String>,
    nouns: FxHashSet<String>,
    adjectives: FxHashSet<String>,
}

impl Lexicon {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `word<TAB>TAG[,TAG...]` lines.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resource` for lines without exactly two fields or with a
    /// tag code that is not a Penn Treebank tag.
    pub fn parse(source: &str, file: &str) -> Result<Self> {
        let mut lexicon = Self::new();
        let mut tags: SmallVec<[PosTag; 2]> = SmallVec::new();

        for (line, fields) in data_lines(source) {
            let [word, codes] = fields[..] else {
                return Err(Error::Resource {
                    file: file.to_string(),
                    line,
                    reason: format!("expected 2 fields, found {}", fields.len()),
                });
            };

            tags.clear();
            for code in codes.split(',') {
                match PosTag::parse(code) {
                    PosTag::Other => {
                        return Err(Error::Resource {
                            file: file.to_string(),
                            line,
                            reason: format!("unknown tag {:?}", code),
                        })
                    }
                    tag => tags.push(tag),
                }
            }
            lexicon.insert(word, &tags);
        }

        Ok(lexicon)
    }

    /// Adds tags for `word`. Tags already present are kept first, so the
    /// first tag ever inserted stays the default.
    pub fn insert(&mut self, word: &str, tags: &[PosTag]) {
        let entry = self.entries.entry(word.to_string()).or_default();
        for &tag in tags {
            if !entry.contains(&tag) {
                entry.push(tag);
            }
            let class = match tag {
                PosTag::VB => &mut self.verbs,
                PosTag::NN => &mut self.nouns,
                PosTag::JJ => &mut self.adjectives,
                _ => continue,
            };
            class.insert(word.to_string());
        }
    }

    /// Registers `word` as a base form for the lemmatizer without giving the
    /// tagger a tag for it.
    pub fn add_base_form(&mut self, word: &str, mode: LemmaMode) {
        self.class_mut(mode).insert(word.to_string());
    }

    /// Default tag for `word`, if known.
    #[inline]
    pub fn default_tag(&self, word: &str) -> Option<PosTag> {
        self.entries.get(word).and_then(|tags| tags.first().copied())
    }

    /// Returns `true` if `word` is listed with `tag`.
    #[inline]
    pub fn has_tag(&self, word: &str, tag: PosTag) -> bool {
        self.entries
            .get(word)
            .is_some_and(|tags| tags.contains(&tag))
    }

    /// Returns `true` if `word` is a known base form in the given class.
    #[inline]
    pub fn is_base_form(&self, word: &str, mode: LemmaMode) -> bool {
        self.class(mode).contains(word)
    }

    /// Number of tagged words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no word is tagged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn class(&self, mode: LemmaMode) -> &FxHashSet<String> {
        match mode {
            LemmaMode::Verb => &self.verbs,
            LemmaMode::Adjective => &self.adjectives,
            LemmaMode::Default => &self.nouns,
        }
    }

    fn class_mut(&mut self, mode: LemmaMode) -> &mut FxHashSet<String> {
        match mode {
            LemmaMode::Verb => &mut self.verbs,
            LemmaMode::Adjective => &mut self.adjectives,
            LemmaMode::Default => &mut self.nouns,
        }
    }
}

/// Irregular inflection → base form(s), per word class.
#[derive(Debug, Clone, Default)]
pub struct ExceptionTable {
    verbs: FxHashMap<String, SmallVec<[String; 1]>>,
    nouns: FxHashMap<String, SmallVec<[String; 1]>>,
    adjectives: FxHashMap<String, SmallVec<[String; 1]>>,
}

impl ExceptionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `class<TAB>inflected<TAB>base` lines, class being `v`, `a` or `n`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resource` for malformed lines or unknown classes.
    pub fn parse(source: &str, file: &str) -> Result<Self> {
        let mut table = Self::new();

        for (line, fields) in data_lines(source) {
            let [class, inflected, base] = fields[..] else {
                return Err(Error::Resource {
                    file: file.to_string(),
                    line,
                    reason: format!("expected 3 fields, found {}", fields.len()),
                });
            };
            let mode = LemmaMode::from_class_code(class).ok_or_else(|| Error::Resource {
                file: file.to_string(),
                line,
                reason: format!("unknown word class {:?}", class),
            })?;
            table.insert(mode, inflected, base);
        }

        Ok(table)
    }

    /// Adds one exception.
    pub fn insert(&mut self, mode: LemmaMode, inflected: &str, base: &str) {
        let bases = self.map_mut(mode).entry(inflected.to_string()).or_default();
        if !bases.iter().any(|b| b == base) {
            bases.push(base.to_string());
        }
    }

    /// Base forms listed for `word` in the given class.
    #[inline]
    pub fn bases(&self, word: &str, mode: LemmaMode) -> Option<&[String]> {
        self.map(mode).get(word).map(|b| b.as_slice())
    }

    /// Total number of exceptions across classes.
    pub fn len(&self) -> usize {
        self.verbs.len() + self.nouns.len() + self.adjectives.len()
    }

    /// Returns `true` if the table holds no exception.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map(&self, mode: LemmaMode) -> &FxHashMap<String, SmallVec<[String; 1]>> {
        match mode {
            LemmaMode::Verb => &self.verbs,
            LemmaMode::Adjective => &self.adjectives,
            LemmaMode::Default => &self.nouns,
        }
    }

    fn map_mut(&mut self, mode: LemmaMode) -> &mut FxHashMap<String, SmallVec<[String; 1]>> {
        match mode {
            LemmaMode::Verb => &mut self.verbs,
            LemmaMode::Adjective => &mut self.adjectives,
            LemmaMode::Default => &mut self.nouns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lexicon() {
        let src = "# comment\n\ngo\tVB\nwork\tVB,NN\nhome\tNN\nhappy\tJJ\n";
        let lexicon = Lexicon::parse(src, "lexicon.tsv").expect("should parse");
        assert_eq!(lexicon.len(), 4);
        assert_eq!(lexicon.default_tag("work"), Some(PosTag::VB));
        assert!(lexicon.has_tag("work", PosTag::NN));
        assert!(lexicon.is_base_form("work", LemmaMode::Verb));
        assert!(lexicon.is_base_form("work", LemmaMode::Default));
        assert!(lexicon.is_base_form("happy", LemmaMode::Adjective));
        assert!(!lexicon.is_base_form("home", LemmaMode::Verb));
        assert_eq!(lexicon.default_tag("missing"), None);
    }

    #[test]
    fn inflected_tags_are_not_base_forms() {
        let lexicon = Lexicon::parse("went\tVBD\nbetter\tJJR\n", "lexicon.tsv").unwrap();
        assert!(!lexicon.is_base_form("went", LemmaMode::Verb));
        assert!(!lexicon.is_base_form("better", LemmaMode::Adjective));
    }

    #[test]
    fn first_tag_stays_default() {
        let mut lexicon = Lexicon::new();
        lexicon.insert("walk", &[PosTag::VB]);
        lexicon.insert("walk", &[PosTag::NN, PosTag::VB]);
        assert_eq!(lexicon.default_tag("walk"), Some(PosTag::VB));
        assert!(lexicon.has_tag("walk", PosTag::NN));
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = Lexicon::parse("go\tVB\nhome\tNOUN\n", "lexicon.tsv").unwrap_err();
        match err {
            Error::Resource { file, line, .. } => {
                assert_eq!(file, "lexicon.tsv");
                assert_eq!(line, 2);
            }
            other => panic!("Expected Resource error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_field_count_rejected() {
        assert!(Lexicon::parse("go VB extra\n", "lexicon.tsv").is_err());
        assert!(ExceptionTable::parse("v went\n", "exceptions.tsv").is_err());
    }

    #[test]
    fn parse_exceptions() {
        let src = "v\twent\tgo\nn\tchildren\tchild\na\tbetter\tgood\nv\tleft\tleave\n";
        let table = ExceptionTable::parse(src, "exceptions.tsv").expect("should parse");
        assert_eq!(table.len(), 4);
        assert_eq!(table.bases("went", LemmaMode::Verb), Some(&["go".to_string()][..]));
        assert_eq!(table.bases("went", LemmaMode::Default), None);
        assert!(table.bases("children", LemmaMode::Default).is_some());
    }

    #[test]
    fn unknown_class_rejected() {
        let err = ExceptionTable::parse("r\tfaster\tfast\n", "exceptions.tsv").unwrap_err();
        assert!(matches!(err, Error::Resource { line: 1, .. }));
    }

    #[test]
    fn duplicate_exception_bases_collapse() {
        let mut table = ExceptionTable::new();
        table.insert(LemmaMode::Verb, "saw", "see");
        table.insert(LemmaMode::Verb, "saw", "see");
        table.insert(LemmaMode::Verb, "saw", "saw");
        assert_eq!(table.bases("saw", LemmaMode::Verb).map(|b| b.len()), Some(2));
    }
}
